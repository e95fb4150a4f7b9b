use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Area {
    /// UUID of the area, assigned at creation
    pub id: Uuid,
    /// Display name shown on the card
    pub name: String,
    /// Display order, lower first. Unset sorts after every explicit order
    pub order: Option<u32>,
    /// Availability shown on the status badge
    #[serde(default)]
    pub status: Status,
    /// Reference to an uploaded image replacing the flag placeholder
    pub custom_image: Option<String>,
    /// Absolute URL the card links to
    pub link_url: Option<String>,
    /// When the area was created
    pub created_at: Timestamp,
    /// When the area was last edited
    pub updated_at: Option<Timestamp>,
}

impl Default for Area {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4(),
            name: String::new(),
            order: None,
            status: Status::default(),
            custom_image: None,
            link_url: None,
            created_at: Timestamp::now(),
            updated_at: None,
        }
    }
}

#[derive(Serialize, Deserialize, Default, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    #[default]
    Available,
    Unavailable,
    ComingSoon,
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown status '{0}', expected one of: available, unavailable, coming_soon")]
pub struct UnknownStatus(pub String);

impl Status {
    pub const ALL: [Status; 3] = [Status::Available, Status::Unavailable, Status::ComingSoon];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Available => "available",
            Status::Unavailable => "unavailable",
            Status::ComingSoon => "coming_soon",
        }
    }

    /// Parses a status as submitted through a form. A blank value means the
    /// field was left untouched and resolves to `Available`.
    pub fn parse_submitted(value: &str) -> Result<Status, UnknownStatus> {
        let value = value.trim();
        if value.is_empty() {
            return Ok(Status::Available);
        }

        Status::ALL
            .into_iter()
            .find(|status| status.as_str() == value)
            .ok_or_else(|| UnknownStatus(value.to_string()))
    }
}

/// Validated field values for creating or replacing an area
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AreaFields {
    pub name: String,
    pub order: Option<u32>,
    pub status: Status,
    pub custom_image: Option<String>,
    pub link_url: Option<String>,
}
