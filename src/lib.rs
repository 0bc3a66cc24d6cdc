//! Builds an M3U playlist of live TV channels by merging a global channel
//! catalog with per-country channel lists.

pub mod catalog;
pub mod config;
pub mod errors;
pub mod generator;
pub mod metrics;
pub mod models;
pub mod services;
pub mod sources;
pub mod utils;
