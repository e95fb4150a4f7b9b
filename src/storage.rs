use std::path::PathBuf;

use thiserror::Error;

use crate::models::store::Store;

pub mod json;
pub mod migrations;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Could not read store '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Store '{path}' is not valid: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Could not encode store: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Could not lock '{path}': {source}")]
    Lock {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not write '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not back up store into '{dir}': {source}")]
    Backup {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to migrate store from version {from}: {reason}")]
    MigrationFailed { from: u32, reason: String },

    #[error(
        "Store file was created by a newer version of service-areas (version {0}). Please upgrade to open this file."
    )]
    FutureVersion(u32),

    #[error("No migration path from store version {0}")]
    UnsupportedVersion(u32),
}

/// Persistence collaborator for the whole store. Writes are last-write-wins.
pub trait Storage {
    fn load(&self) -> Result<Store, StorageError>;
    fn save(&self, store: &Store) -> Result<(), StorageError>;
}
