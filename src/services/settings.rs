use thiserror::Error;
use tracing::info;

use crate::{
    models::{settings::SiteSettings, store::Store},
    storage::{Storage, StorageError},
};

#[derive(Debug, Error)]
pub enum UpdateSettingsError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Heading fields as submitted. A blank field restores the default text.
#[derive(Clone, Debug, Default)]
pub struct SettingsForm {
    pub title: String,
    pub subtitle: String,
}

impl SettingsForm {
    pub fn from_settings(settings: &SiteSettings) -> Self {
        Self {
            title: settings.title.clone().unwrap_or_default(),
            subtitle: settings.subtitle.clone().unwrap_or_default(),
        }
    }
}

pub fn update_settings(
    store: &mut Store,
    storage: &impl Storage,
    form: SettingsForm,
) -> Result<SiteSettings, UpdateSettingsError> {
    let mut next = store.clone();
    next.settings = SiteSettings::new(Some(form.title), Some(form.subtitle));

    storage.save(&next)?;
    *store = next;

    info!(
        title = ?store.settings.title,
        subtitle = ?store.settings.subtitle,
        "settings saved"
    );
    Ok(store.settings.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::json::JsonFileStorage;
    use tempfile::TempDir;

    #[test]
    fn test_update_settings_persists() {
        let dir = TempDir::new().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("store.json"));
        let mut store = Store::default();

        let form = SettingsForm {
            title: " Where we work ".to_string(),
            subtitle: String::new(),
        };
        update_settings(&mut store, &storage, form).unwrap();

        let reloaded = storage.load().unwrap();
        assert_eq!(reloaded.settings.title.as_deref(), Some("Where we work"));
        assert_eq!(reloaded.settings.subtitle, None);
    }

    struct ReadOnlyStorage;

    impl Storage for ReadOnlyStorage {
        fn load(&self) -> Result<Store, StorageError> {
            Ok(Store::default())
        }

        fn save(&self, _store: &Store) -> Result<(), StorageError> {
            Err(StorageError::Write {
                path: "/read-only/store.json".into(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            })
        }
    }

    #[test]
    fn test_failed_save_keeps_previous_settings() {
        let mut store = Store::default();
        store.settings = SiteSettings::new(Some("Coverage".to_string()), None);

        let form = SettingsForm {
            title: "Where we work".to_string(),
            subtitle: String::new(),
        };
        let result = update_settings(&mut store, &ReadOnlyStorage, form);

        assert!(matches!(result, Err(UpdateSettingsError::Storage(_))));
        assert_eq!(store.settings.title.as_deref(), Some("Coverage"));
    }

    #[test]
    fn test_form_prefills_stored_values() {
        let settings = SiteSettings::new(Some("Areas".to_string()), None);
        let form = SettingsForm::from_settings(&settings);
        assert_eq!(form.title, "Areas");
        assert_eq!(form.subtitle, "");
    }
}
