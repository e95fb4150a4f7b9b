use std::{
    fs::{self, File, OpenOptions},
    io::ErrorKind,
    path::{Path, PathBuf},
};

use fs2::FileExt;
use jiff::Timestamp;
use serde_json::Value;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::{
    models::store::{CURRENT_VERSION, Store},
    storage::{
        Storage, StorageError,
        migrations::{apply_migrations, detect_version},
    },
};

/// Keep this many backups next to the store
const BACKUPS_KEPT: usize = 5;

/// Store kept as one pretty-printed JSON document. Saves go through a temp
/// file and a rename while holding an exclusive lock on `<store>.lock`; the
/// previous document is copied into `backups/` first.
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn dir(&self) -> &Path {
        self.path.parent().unwrap_or(Path::new("."))
    }

    fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "store.json".to_string())
    }

    fn decode(&self, content: &str) -> Result<Store, StorageError> {
        let parse_error = |source: serde_json::Error| StorageError::Parse {
            path: self.path.clone(),
            source,
        };

        let mut data: Value = serde_json::from_str(content).map_err(parse_error)?;

        let file_version = detect_version(&data)?;
        if file_version > CURRENT_VERSION {
            return Err(StorageError::FutureVersion(file_version));
        }
        if file_version < CURRENT_VERSION {
            debug!(path = %self.path.display(), file_version, "store needs migration");
            data = apply_migrations(data, file_version, CURRENT_VERSION)?;
            if let Some(obj) = data.as_object_mut() {
                obj.insert("version".to_string(), Value::from(CURRENT_VERSION));
            }
        }

        serde_json::from_value(data).map_err(parse_error)
    }

    fn lock(&self) -> Result<File, StorageError> {
        let lock_path = self.path.with_extension("lock");
        let lock_error = |source: std::io::Error| StorageError::Lock {
            path: lock_path.clone(),
            source,
        };

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(lock_error)?;
        file.lock_exclusive().map_err(lock_error)?;
        Ok(file)
    }

    /// Copies the current document into `backups/` and prunes the oldest
    /// copies. Nothing to do before the first save.
    fn back_up(&self) -> Result<(), StorageError> {
        if !self.path.is_file() {
            return Ok(());
        }

        let dir = self.dir().join("backups");
        let backup_error = |source: std::io::Error| StorageError::Backup {
            dir: dir.clone(),
            source,
        };

        fs::create_dir_all(&dir).map_err(backup_error)?;
        let target = dir.join(backup_name(&self.file_name(), Timestamp::now()));
        fs::copy(&self.path, &target).map_err(backup_error)?;

        let mut backups: Vec<PathBuf> = fs::read_dir(&dir)
            .map_err(backup_error)?
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| path.is_file())
            .collect();
        backups.sort();

        let excess = backups.len().saturating_sub(BACKUPS_KEPT);
        if excess > 0 {
            debug!(count = excess, "removing old backups");
        }
        for old in &backups[..excess] {
            fs::remove_file(old).map_err(backup_error)?;
        }

        Ok(())
    }
}

/// `<file>-<UTC date and time>-<nanoseconds>`, fixed width so that names sort
/// in the order the backups were taken
fn backup_name(file_name: &str, at: Timestamp) -> String {
    format!(
        "{}-{}-{:09}",
        file_name,
        at.strftime("%Y%m%dT%H%M%S"),
        at.subsec_nanosecond()
    )
}

/// Temp file that is removed unless it was renamed into place
struct PendingWrite {
    path: PathBuf,
    committed: bool,
}

impl PendingWrite {
    fn create(path: PathBuf, contents: &str) -> Result<Self, StorageError> {
        let pending = Self {
            path,
            committed: false,
        };
        fs::write(&pending.path, contents).map_err(|source| StorageError::Write {
            path: pending.path.clone(),
            source,
        })?;
        Ok(pending)
    }

    fn commit(mut self, target: &Path) -> Result<(), StorageError> {
        fs::rename(&self.path, target).map_err(|source| StorageError::Write {
            path: target.to_path_buf(),
            source,
        })?;
        self.committed = true;
        Ok(())
    }
}

impl Drop for PendingWrite {
    fn drop(&mut self) {
        if self.committed {
            return;
        }
        if let Err(e) = fs::remove_file(&self.path) {
            if e.kind() != ErrorKind::NotFound {
                warn!(path = %self.path.display(), error = %e, "could not remove temp file");
            }
        }
    }
}

impl Storage for JsonFileStorage {
    fn load(&self) -> Result<Store, StorageError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no store yet, starting empty");
                return Ok(Store::default());
            }
            Err(source) => {
                return Err(StorageError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let store = self.decode(&content)?;
        debug!(path = %self.path.display(), areas = store.areas.len(), "store loaded");
        Ok(store)
    }

    fn save(&self, store: &Store) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(store).map_err(StorageError::Encode)?;

        // Released when dropped
        let _lock = self.lock()?;

        let temp_path = self
            .dir()
            .join(format!("{}.tmp.{}", self.file_name(), Uuid::new_v4()));
        let pending = PendingWrite::create(temp_path, &json)?;

        self.back_up()?;
        pending.commit(&self.path)?;

        debug!(path = %self.path.display(), areas = store.areas.len(), "store saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    use crate::models::{
        area::{AreaFields, Status},
        settings::SiteSettings,
    };

    fn storage_in(dir: &TempDir) -> JsonFileStorage {
        JsonFileStorage::new(dir.path().join("store.json"))
    }

    fn files_in(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .flatten()
            .filter(|entry| entry.path().is_file())
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let storage = storage_in(&dir);

        let mut store = Store::default();
        let id = store
            .add_area(AreaFields {
                name: String::from("Dubai"),
                order: Some(1),
                status: Status::ComingSoon,
                custom_image: Some(String::from("dubai.png")),
                link_url: Some(String::from("https://example.com/dubai")),
            })
            .id;
        store.settings = SiteSettings::new(Some(String::from("Where we work")), None);

        storage.save(&store).unwrap();
        let loaded = storage.load().unwrap();

        assert_eq!(loaded.areas, store.areas);
        assert_eq!(loaded.get_area(id).unwrap().status, Status::ComingSoon);
        assert_eq!(loaded.settings, store.settings);
    }

    #[test]
    fn test_load_missing_file_is_empty_store() {
        let dir = TempDir::new().unwrap();
        let store = storage_in(&dir).load().unwrap();
        assert!(store.areas.is_empty());
        assert_eq!(store.version, CURRENT_VERSION);
    }

    #[test]
    fn test_load_invalid_json() {
        let dir = TempDir::new().unwrap();
        let storage = storage_in(&dir);
        fs::write(dir.path().join("store.json"), "{ this is not valid json }").unwrap();

        assert!(matches!(storage.load(), Err(StorageError::Parse { .. })));
    }

    #[test]
    fn test_load_unknown_status_in_current_version() {
        let dir = TempDir::new().unwrap();
        let storage = storage_in(&dir);
        let json = r#"{
            "version": 2,
            "areas": [{
                "id": "6a1f0e0c-8f3b-4b7e-9d55-0c4c2b8e2f10",
                "name": "Dubai",
                "order": null,
                "status": "closed",
                "custom_image": null,
                "link_url": null,
                "created_at": "2025-01-01T00:00:00Z",
                "updated_at": null
            }]
        }"#;
        fs::write(dir.path().join("store.json"), json).unwrap();

        assert!(matches!(storage.load(), Err(StorageError::Parse { .. })));
    }

    #[test]
    fn test_load_v1_without_version_field() {
        let dir = TempDir::new().unwrap();
        let storage = storage_in(&dir);
        let old_json = r#"{
            "areas": [{
                "id": "6a1f0e0c-8f3b-4b7e-9d55-0c4c2b8e2f10",
                "name": "Dubai",
                "order": "3",
                "status": "",
                "custom_image": "",
                "link_url": "",
                "created_at": "2025-01-01T00:00:00Z"
            }]
        }"#;
        fs::write(dir.path().join("store.json"), old_json).unwrap();

        let store = storage.load().unwrap();

        assert_eq!(store.version, CURRENT_VERSION);
        assert_eq!(store.areas[0].order, Some(3));
        assert_eq!(store.areas[0].status, Status::Available);
        assert_eq!(store.areas[0].link_url, None);
        assert_eq!(store.settings, SiteSettings::default());
    }

    #[test]
    fn test_load_future_version() {
        let dir = TempDir::new().unwrap();
        let storage = storage_in(&dir);
        fs::write(
            dir.path().join("store.json"),
            r#"{"version": 999, "areas": []}"#,
        )
        .unwrap();

        assert!(matches!(storage.load(), Err(StorageError::FutureVersion(999))));
    }

    #[test]
    fn test_backups_are_pruned() {
        let dir = TempDir::new().unwrap();
        let storage = storage_in(&dir);

        for i in 1..=7 {
            let mut store = Store::default();
            store.add_area(AreaFields {
                name: format!("Area {i}"),
                ..AreaFields::default()
            });
            storage.save(&store).unwrap();
        }

        let backups = files_in(&dir.path().join("backups"));
        assert_eq!(backups.len(), BACKUPS_KEPT);
    }

    #[test]
    fn test_first_save_takes_no_backup() {
        let dir = TempDir::new().unwrap();
        let storage = storage_in(&dir);
        let backups_dir = dir.path().join("backups");

        storage.save(&Store::default()).unwrap();
        assert!(!backups_dir.exists());

        storage.save(&Store::default()).unwrap();
        assert_eq!(files_in(&backups_dir).len(), 1);
    }

    #[test]
    fn test_backup_names_sort_by_time() {
        let whole: Timestamp = "2025-01-01T00:00:00Z".parse().unwrap();
        let half: Timestamp = "2025-01-01T00:00:00.5Z".parse().unwrap();
        let next: Timestamp = "2025-01-01T00:00:01Z".parse().unwrap();

        let names = [
            backup_name("store.json", whole),
            backup_name("store.json", half),
            backup_name("store.json", next),
        ];

        assert!(names[0] < names[1] && names[1] < names[2]);
        assert_eq!(names[0], "store.json-20250101T000000-000000000");
    }

    #[test]
    fn test_failed_save_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        let storage = storage_in(&dir);
        let mut store = Store::default();
        store.add_area(AreaFields {
            name: String::from("Dubai"),
            ..AreaFields::default()
        });
        storage.save(&store).unwrap();
        fs::write(dir.path().join("backups"), "not a directory").unwrap();

        store.add_area(AreaFields {
            name: String::from("Sharjah"),
            ..AreaFields::default()
        });
        let result = storage.save(&store);

        assert!(matches!(result, Err(StorageError::Backup { .. })));
        assert!(files_in(dir.path()).iter().all(|name| !name.contains(".tmp.")));
        assert_eq!(storage.load().unwrap().areas.len(), 1);
    }
}
