use thiserror::Error;
use tracing::{info, warn};
use url::Url;
use uuid::Uuid;

use crate::{
    media::MediaLibrary,
    models::{
        area::{Area, AreaFields, Status},
        store::Store,
    },
    storage::{Storage, StorageError},
};

/// Area fields exactly as submitted through the edit form
#[derive(Clone, Debug, Default)]
pub struct AreaForm {
    pub name: String,
    pub order: String,
    pub status: String,
    pub custom_image: String,
    pub link_url: String,
}

impl AreaForm {
    /// Pre-fills the form with the stored values of an area
    pub fn from_area(area: &Area) -> Self {
        Self {
            name: area.name.clone(),
            order: area.order.map(|o| o.to_string()).unwrap_or_default(),
            status: area.status.as_str().to_string(),
            custom_image: area.custom_image.clone().unwrap_or_default(),
            link_url: area.link_url.clone().unwrap_or_default(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Name,
    Order,
    Status,
    CustomImage,
    LinkUrl,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Order => "order",
            Field::Status => "status",
            Field::CustomImage => "custom_image",
            Field::LinkUrl => "link_url",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

/// Every field of a submission that failed validation
#[derive(Clone, Debug, PartialEq, Error)]
#[error("Invalid area: {}", join_errors(.errors))]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

fn join_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field.as_str(), e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Checks a submission and produces normalized fields. Nothing is written here.
pub fn validate(form: &AreaForm, media: &dyn MediaLibrary) -> Result<AreaFields, ValidationError> {
    let mut errors = Vec::new();
    let mut flag = |field: Field, message: String| errors.push(FieldError { field, message });

    let name = form.name.trim().to_string();
    if name.is_empty() {
        flag(Field::Name, "is required".to_string());
    }

    let order = match form.order.trim() {
        "" => None,
        raw => match raw.parse::<u32>() {
            Ok(order) => Some(order),
            Err(_) => {
                flag(
                    Field::Order,
                    format!("'{raw}' is not a non-negative whole number"),
                );
                None
            }
        },
    };

    let status = match Status::parse_submitted(&form.status) {
        Ok(status) => status,
        Err(e) => {
            flag(Field::Status, e.to_string());
            Status::default()
        }
    };

    let custom_image = match form.custom_image.trim() {
        "" => None,
        reference => match media.find(reference) {
            Some(asset) => Some(asset.reference),
            None => {
                flag(
                    Field::CustomImage,
                    format!("'{reference}' is not an uploaded image"),
                );
                None
            }
        },
    };

    let link_url = match form.link_url.trim() {
        "" => None,
        raw => match parse_link_url(raw) {
            Some(url) => Some(url),
            None => {
                flag(
                    Field::LinkUrl,
                    format!("'{raw}' is not an absolute http(s) URL"),
                );
                None
            }
        },
    };

    if !errors.is_empty() {
        return Err(ValidationError { errors });
    }

    Ok(AreaFields {
        name,
        order,
        status,
        custom_image,
        link_url,
    })
}

/// Keeps the URL as submitted once it parses as absolute http(s)
fn parse_link_url(raw: &str) -> Option<String> {
    let url = Url::parse(raw).ok()?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return None;
    }
    Some(raw.to_string())
}

#[derive(Debug, Error)]
pub enum CreateAreaError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

pub fn create_area(
    store: &mut Store,
    storage: &impl Storage,
    media: &dyn MediaLibrary,
    form: AreaForm,
) -> Result<Area, CreateAreaError> {
    let fields = validate(&form, media).inspect_err(|e| warn!(%e, "rejected new area"))?;

    let mut next = store.clone();
    let area = next.add_area(fields).clone();

    storage.save(&next)?;
    *store = next;

    info!(id = %area.id, name = %area.name, "area created");
    Ok(area)
}

#[derive(Debug, Error)]
pub enum UpdateAreaError {
    #[error("Area '{0}' not found")]
    AreaNotFound(Uuid),

    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

pub fn update_area(
    store: &mut Store,
    storage: &impl Storage,
    media: &dyn MediaLibrary,
    id: Uuid,
    form: AreaForm,
) -> Result<Area, UpdateAreaError> {
    if store.get_area(id).is_none() {
        return Err(UpdateAreaError::AreaNotFound(id));
    }

    let fields = validate(&form, media).inspect_err(|e| warn!(%id, %e, "rejected area edit"))?;

    let mut next = store.clone();
    let area = next
        .update_area(id, fields)
        .cloned()
        .ok_or(UpdateAreaError::AreaNotFound(id))?;

    storage.save(&next)?;
    *store = next;

    info!(%id, name = %area.name, "area updated");
    Ok(area)
}

#[derive(Debug, Error)]
pub enum DeleteAreaError {
    #[error("Area '{0}' not found")]
    AreaNotFound(Uuid),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

pub fn delete_area(
    store: &mut Store,
    storage: &impl Storage,
    id: Uuid,
) -> Result<Area, DeleteAreaError> {
    let mut next = store.clone();
    let area = next
        .remove_area(id)
        .ok_or(DeleteAreaError::AreaNotFound(id))?;

    storage.save(&next)?;
    *store = next;

    info!(%id, name = %area.name, "area deleted");
    Ok(area)
}

/// All stored areas in display order
pub fn list_areas(store: &Store) -> Vec<&Area> {
    store.ordered_areas()
}
