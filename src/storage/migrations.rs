use serde_json::{Map, Value};
use tracing::debug;

use crate::{models::area::Status, storage::StorageError};

type MigrationFn = fn(Value) -> Result<Value, StorageError>;

fn get_migrations() -> Vec<MigrationFn> {
    vec![migrate_v1_to_v2]
}

/// Returns 1 if version field is missing (assumes v1, our first versioned schema)
pub fn detect_version(value: &Value) -> Result<u32, StorageError> {
    match value.get("version") {
        Some(v) => v
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(|| StorageError::MigrationFailed {
                from: 0,
                reason: format!("version field is not a schema number: {v}"),
            }),
        None => Ok(1),
    }
}

/// Migrations are applied sequentially: v1→v2→v3→...→target
pub fn apply_migrations(
    mut data: Value,
    from_version: u32,
    to_version: u32,
) -> Result<Value, StorageError> {
    if from_version == to_version {
        return Ok(data);
    }

    if from_version > to_version {
        return Err(StorageError::FutureVersion(from_version));
    }

    let migrations = get_migrations();

    for version in from_version..to_version {
        // v1→v2 is at index 0
        let migration_idx = version.checked_sub(1).map(|i| i as usize);

        let Some(migration) = migration_idx.and_then(|i| migrations.get(i)) else {
            return Err(StorageError::UnsupportedVersion(version));
        };

        debug!(from = version, to = version + 1, "migrating store");
        data = migration(data)?;
    }

    Ok(data)
}

/// Version 1 kept area fields exactly as submitted: `order` as a string that
/// may be empty, `status` possibly empty, and empty strings for a missing
/// image or link. Version 2 stores typed, normalized values.
fn migrate_v1_to_v2(mut value: Value) -> Result<Value, StorageError> {
    let Some(obj) = value.as_object_mut() else {
        return Err(StorageError::MigrationFailed {
            from: 1,
            reason: "store root is not an object".to_string(),
        });
    };

    obj.insert("version".to_string(), Value::from(2));

    if let Some(areas) = obj.get_mut("areas").and_then(|a| a.as_array_mut()) {
        for area in areas {
            if let Some(area_obj) = area.as_object_mut() {
                migrate_area_v1(area_obj)?;
            }
        }
    }

    Ok(value)
}

fn migrate_area_v1(area: &mut Map<String, Value>) -> Result<(), StorageError> {
    let order = match area.remove("order") {
        Some(Value::String(s)) if s.trim().is_empty() => Value::Null,
        Some(Value::String(s)) => match s.trim().parse::<u32>() {
            Ok(n) => Value::from(n),
            Err(_) => {
                return Err(StorageError::MigrationFailed {
                    from: 1,
                    reason: format!("area order '{s}' is not a non-negative integer"),
                });
            }
        },
        Some(other) => other,
        None => Value::Null,
    };
    area.insert("order".to_string(), order);

    let status = area
        .get("status")
        .and_then(|s| s.as_str())
        .and_then(|s| Status::parse_submitted(s).ok())
        .unwrap_or_default();
    area.insert("status".to_string(), Value::from(status.as_str()));

    for field in ["custom_image", "link_url"] {
        let blank = match area.get(field) {
            Some(Value::String(s)) => s.trim().is_empty(),
            None => true,
            _ => false,
        };
        if blank {
            area.insert(field.to_string(), Value::Null);
        }
    }

    Ok(())
}
