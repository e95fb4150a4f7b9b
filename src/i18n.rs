use std::{borrow::Cow, collections::HashMap, path::{Path, PathBuf}};

use thiserror::Error;
use tracing::warn;

/// Every string the rendered page shows, addressed by a stable key
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Text {
    DefaultTitle,
    DefaultSubtitle,
    StatusAvailable,
    StatusUnavailable,
    StatusComingSoon,
    NoAreas,
    WidgetNoAreas,
}

impl Text {
    pub const ALL: [Text; 7] = [
        Text::DefaultTitle,
        Text::DefaultSubtitle,
        Text::StatusAvailable,
        Text::StatusUnavailable,
        Text::StatusComingSoon,
        Text::NoAreas,
        Text::WidgetNoAreas,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Text::DefaultTitle => "settings.default_title",
            Text::DefaultSubtitle => "settings.default_subtitle",
            Text::StatusAvailable => "status.available",
            Text::StatusUnavailable => "status.unavailable",
            Text::StatusComingSoon => "status.coming_soon",
            Text::NoAreas => "areas.empty",
            Text::WidgetNoAreas => "widget.empty",
        }
    }

    fn english(&self) -> &'static str {
        match self {
            Text::DefaultTitle => "Our Service Areas",
            Text::DefaultSubtitle => "We cover all Emirates with premium professional services",
            Text::StatusAvailable => "Available Now",
            Text::StatusUnavailable => "Not Available",
            Text::StatusComingSoon => "Coming Soon",
            Text::NoAreas => "No service areas found. Please add some areas first.",
            Text::WidgetNoAreas => "No service areas found.",
        }
    }

    fn from_key(key: &str) -> Option<Text> {
        Text::ALL.into_iter().find(|t| t.key() == key)
    }
}

pub trait Translator {
    fn text(&self, key: Text) -> Cow<'_, str>;
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog '{path}': {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse catalog '{path}': {source}")]
    ParseFailed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// English strings with optional per-locale overrides
#[derive(Default, Debug)]
pub struct Catalog {
    overrides: HashMap<Text, String>,
}

impl Catalog {
    /// Loads overrides from a flat JSON object of `key -> text`
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|e| CatalogError::ReadFailed {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_json(&content).map_err(|e| CatalogError::ParseFailed {
            path: path.to_path_buf(),
            source: e,
        })
    }

    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        let entries: HashMap<String, String> = serde_json::from_str(content)?;
        let mut overrides = HashMap::new();
        for (key, value) in entries {
            match Text::from_key(&key) {
                Some(text) => {
                    overrides.insert(text, value);
                }
                None => warn!(key = %key, "ignoring unknown catalog key"),
            }
        }
        Ok(Self { overrides })
    }
}

impl Translator for Catalog {
    fn text(&self, key: Text) -> Cow<'_, str> {
        match self.overrides.get(&key) {
            Some(text) => Cow::Borrowed(text.as_str()),
            None => Cow::Borrowed(key.english()),
        }
    }
}
