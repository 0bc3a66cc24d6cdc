use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Channel record from the global catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelCatalogEntry {
    /// Primary lookup key. Required; its absence is a fatal catalog error
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "crate::utils::null_as_default")]
    pub alt_names: Vec<String>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default, deserialize_with = "crate::utils::null_as_default")]
    pub categories: Vec<String>,
}

impl ChannelCatalogEntry {
    pub fn new<N: Into<String>>(name: N) -> Self {
        Self {
            name: Some(name.into()),
            alt_names: Vec::new(),
            id: None,
            logo: None,
            categories: Vec::new(),
        }
    }

    pub fn with_id<S: Into<String>>(mut self, id: S) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_logo<S: Into<String>>(mut self, logo: S) -> Self {
        self.logo = Some(logo.into());
        self
    }

    pub fn with_alt_names<I, S>(mut self, alt_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.alt_names = alt_names.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    /// Logo URL, treating an empty string as absent
    pub fn logo_url(&self) -> Option<&str> {
        self.logo.as_deref().filter(|logo| !logo.is_empty())
    }
}

/// Country entry of the channel-list metadata document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryInfo {
    /// Display name
    #[serde(default)]
    pub country: String,
    #[serde(rename = "hasChannels", default)]
    pub has_channels: bool,
}

/// Country code to [`CountryInfo`] mapping, in document order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountryMetadata {
    countries: Vec<(String, CountryInfo)>,
}

impl CountryMetadata {
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CountryInfo)> {
        self.countries
            .iter()
            .map(|(code, info)| (code.as_str(), info))
    }

    /// Countries flagged as having channels, in document order
    pub fn with_channels(&self) -> impl Iterator<Item = (&str, &CountryInfo)> {
        self.iter().filter(|(_, info)| info.has_channels)
    }

    pub fn len(&self) -> usize {
        self.countries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }
}

impl<C: Into<String>> FromIterator<(C, CountryInfo)> for CountryMetadata {
    fn from_iter<T: IntoIterator<Item = (C, CountryInfo)>>(iter: T) -> Self {
        let mut metadata = Self::default();
        for (code, info) in iter {
            metadata.insert(code.into(), info);
        }
        metadata
    }
}

impl CountryMetadata {
    /// Insert keeping the first position of a repeated code, like a JSON object would
    fn insert(&mut self, code: String, info: CountryInfo) {
        match self.countries.iter_mut().find(|(existing, _)| *existing == code) {
            Some((_, slot)) => *slot = info,
            None => self.countries.push((code, info)),
        }
    }
}

impl<'de> Deserialize<'de> for CountryMetadata {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{MapAccess, Visitor};

        struct CountryMetadataVisitor;

        impl<'de> Visitor<'de> for CountryMetadataVisitor {
            type Value = CountryMetadata;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of country codes to country metadata")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut metadata = CountryMetadata::default();
                while let Some((code, info)) = map.next_entry::<String, CountryInfo>()? {
                    metadata.insert(code, info);
                }
                Ok(metadata)
            }
        }

        deserializer.deserialize_map(CountryMetadataVisitor)
    }
}

/// Channel record from a per-country dataset
///
/// Every field is optional at the decoding layer, and country files are
/// decoded element by element, so one bad record does not poison the rest of
/// its country.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CountryChannelRecord {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub nanoid: Option<String>,
    #[serde(default)]
    pub iptv_urls: Option<Vec<String>>,
    #[serde(default)]
    pub youtube_urls: Option<Vec<String>>,
}

impl CountryChannelRecord {
    pub fn new<N: Into<String>>(name: N) -> Self {
        Self {
            name: Some(name.into()),
            language: None,
            nanoid: None,
            iptv_urls: Some(Vec::new()),
            youtube_urls: Some(Vec::new()),
        }
    }

    pub fn with_language<S: Into<String>>(mut self, language: S) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn with_nanoid<S: Into<String>>(mut self, nanoid: S) -> Self {
        self.nanoid = Some(nanoid.into());
        self
    }

    pub fn with_iptv_urls<I, S>(mut self, urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.iptv_urls = Some(urls.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_youtube_urls<I, S>(mut self, urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.youtube_urls = Some(urls.into_iter().map(Into::into).collect());
        self
    }
}

/// One element of a country file: the decoded record, or why it could not be decoded
pub type DecodedRecord = Result<CountryChannelRecord, String>;

/// Which candidate list a selected stream URL came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreamKind {
    Iptv,
    YouTube,
}

/// One playlist channel, ready for serialization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistEntry {
    pub tvg_id: String,
    pub tvg_country: String,
    pub tvg_language: String,
    pub group_title: String,
    pub tvg_logo: Option<String>,
    pub display_name: String,
    pub stream_url: String,
    pub kind: StreamKind,
}

/// Non-fatal problem recorded during a build
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BuildWarning {
    CountryFetchFailed {
        code: String,
        message: String,
    },
    MalformedRecord {
        code: String,
        position: usize,
        reason: String,
    },
}

impl BuildWarning {
    pub fn country_code(&self) -> &str {
        match self {
            Self::CountryFetchFailed { code, .. } | Self::MalformedRecord { code, .. } => code,
        }
    }
}

impl fmt::Display for BuildWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CountryFetchFailed { code, message } => {
                write!(f, "{}: channel data unavailable ({})", code, message)
            }
            Self::MalformedRecord {
                code,
                position,
                reason,
            } => write!(f, "{}: record #{} skipped ({})", code, position, reason),
        }
    }
}

/// Per-country outcome of a build
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryReport {
    pub code: String,
    pub country: String,
    /// Records received, `None` when the fetch failed
    pub records: Option<usize>,
    pub entries: usize,
}

/// Ordered build output: entries in country-then-channel order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistDocument {
    pub entries: Vec<PlaylistEntry>,
    pub warnings: Vec<BuildWarning>,
    pub countries: Vec<CountryReport>,
}

impl PlaylistDocument {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn count_by_kind(&self, kind: StreamKind) -> usize {
        self.entries.iter().filter(|entry| entry.kind == kind).count()
    }

    pub fn failed_countries(&self) -> usize {
        self.countries
            .iter()
            .filter(|report| report.records.is_none())
            .count()
    }
}
