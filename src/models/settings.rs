use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::i18n::{Text, Translator};

/// Heading shown above the grid. Blank values fall back to the translated
/// defaults when read.
#[derive(Serialize, Deserialize, Default, Clone, Debug, PartialEq)]
pub struct SiteSettings {
    pub title: Option<String>,
    pub subtitle: Option<String>,
}

impl SiteSettings {
    pub fn new(title: Option<String>, subtitle: Option<String>) -> Self {
        Self {
            title: non_blank(title),
            subtitle: non_blank(subtitle),
        }
    }

    pub fn title<'a>(&'a self, translator: &'a dyn Translator) -> Cow<'a, str> {
        match &self.title {
            Some(title) => Cow::Borrowed(title.as_str()),
            None => translator.text(Text::DefaultTitle),
        }
    }

    pub fn subtitle<'a>(&'a self, translator: &'a dyn Translator) -> Cow<'a, str> {
        match &self.subtitle {
            Some(subtitle) => Cow::Borrowed(subtitle.as_str()),
            None => translator.text(Text::DefaultSubtitle),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
