//! M3U serialization of a built playlist document

use std::borrow::Cow;

use crate::config::AttributeEscaping;
use crate::models::{PlaylistDocument, PlaylistEntry};

pub const M3U_HEADER: &str = "#EXTM3U";

/// Serialize a document: header line, then one `#EXTINF` line and one URL
/// line per entry, each terminated by `\n`
pub fn render(document: &PlaylistDocument, escaping: AttributeEscaping) -> String {
    let mut m3u = String::with_capacity(64 + document.entries.len() * 192);
    m3u.push_str(M3U_HEADER);
    m3u.push('\n');

    for entry in &document.entries {
        push_entry(&mut m3u, entry, escaping);
    }

    m3u
}

fn push_entry(m3u: &mut String, entry: &PlaylistEntry, escaping: AttributeEscaping) {
    m3u.push_str(&format!(
        "#EXTINF:-1 tvg-id=\"{}\" tvg-country=\"{}\" tvg-language=\"{}\" group-title=\"{}\" ",
        attribute(&entry.tvg_id, escaping),
        attribute(&entry.tvg_country, escaping),
        attribute(&entry.tvg_language, escaping),
        attribute(&entry.group_title, escaping),
    ));

    if let Some(ref tvg_logo) = entry.tvg_logo {
        m3u.push_str(&format!("tvg-logo=\"{}\" ", attribute(tvg_logo, escaping)));
    }

    m3u.push_str(&format!(",{}\n", line(&entry.display_name, escaping)));
    m3u.push_str(&format!("{}\n", line(&entry.stream_url, escaping)));
}

/// Value placed inside a quoted `key="value"` attribute
fn attribute(value: &str, escaping: AttributeEscaping) -> Cow<'_, str> {
    match escaping {
        AttributeEscaping::Verbatim => Cow::Borrowed(value),
        AttributeEscaping::Sanitize if value.contains(['"', '\r', '\n']) => {
            Cow::Owned(value.replace('"', "'").replace(['\r', '\n'], " "))
        }
        AttributeEscaping::Sanitize => Cow::Borrowed(value),
    }
}

/// Free text occupying the rest of a line
fn line(value: &str, escaping: AttributeEscaping) -> Cow<'_, str> {
    match escaping {
        AttributeEscaping::Sanitize if value.contains(['\r', '\n']) => {
            Cow::Owned(value.replace(['\r', '\n'], " "))
        }
        _ => Cow::Borrowed(value),
    }
}
