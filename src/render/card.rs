//! Per-card decisions, resolved once per area before any markup is written.

use tracing::warn;

use crate::{
    i18n::Text,
    media::MediaLibrary,
    models::area::{Area, Status},
};

/// Outer element of a card: a hyperlink around the whole card or a plain box
#[derive(Clone, Debug, PartialEq)]
pub enum CardShell<'a> {
    Link(&'a str),
    Plain,
}

impl<'a> CardShell<'a> {
    pub fn for_area(area: &'a Area) -> Self {
        match area.link_url.as_deref() {
            Some(url) => CardShell::Link(url),
            None => CardShell::Plain,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum CardImage {
    Custom { src: String },
    Flag,
}

impl CardImage {
    /// Falls back to the flag when the stored reference no longer resolves
    pub fn for_area(area: &Area, media: &dyn MediaLibrary) -> Self {
        let Some(reference) = area.custom_image.as_deref() else {
            return CardImage::Flag;
        };

        match media.find(reference) {
            Some(asset) => CardImage::Custom { src: asset.url },
            None => {
                warn!(id = %area.id, reference, "custom image missing, showing flag");
                CardImage::Flag
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StatusBadge {
    pub label: Text,
    pub class: &'static str,
}

impl StatusBadge {
    pub fn for_status(status: Status) -> Self {
        match status {
            Status::Available => StatusBadge {
                label: Text::StatusAvailable,
                class: "status-available",
            },
            Status::Unavailable => StatusBadge {
                label: Text::StatusUnavailable,
                class: "status-unavailable",
            },
            Status::ComingSoon => StatusBadge {
                label: Text::StatusComingSoon,
                class: "status-coming",
            },
        }
    }
}
