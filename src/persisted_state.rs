use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde_json::{Map, Value};
use thiserror::Error;

use crate::{append_startup_log, PERSISTED_STATE_BACKUP_KEY, PERSISTED_STATE_KEY};

const ARCHIVES_FIELD: &str = "archives";
const SETTINGS_BY_ARCHIVE_FIELD: &str = "settingsByArchiveId";

#[derive(Debug, Error)]
pub(crate) enum StorageError {
    #[error("invalid storage key '{0}'")]
    InvalidKey(String),
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to serialize value for '{key}': {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

fn empty_state_object() -> Value {
    Value::Object(Map::new())
}

/// One JSON document per key under a single directory. Without a directory
/// reads come back empty and writes are dropped.
#[derive(Debug, Clone)]
pub(crate) struct JsonStorage {
    dir: Option<PathBuf>,
}

impl JsonStorage {
    pub(crate) fn new(dir: Option<PathBuf>) -> Self {
        Self { dir }
    }

    pub(crate) fn dir(&self) -> Option<&Path> {
        self.dir.as_deref()
    }

    fn path_for_key(&self, key: &str) -> Result<Option<PathBuf>, StorageError> {
        let trimmed = key.trim();
        if trimmed.is_empty()
            || trimmed.contains(['/', '\\'])
            || trimmed.contains("..")
            || trimmed != key
        {
            return Err(StorageError::InvalidKey(key.to_string()));
        }

        Ok(self
            .dir
            .as_ref()
            .map(|dir| dir.join(format!("{key}.json"))))
    }

    pub(crate) fn get(&self, key: &str) -> Result<Value, StorageError> {
        let Some(path) = self.path_for_key(key)? else {
            return Ok(empty_state_object());
        };

        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                return Ok(empty_state_object());
            }
            Err(source) => return Err(StorageError::Io { path, source }),
        };

        if raw.trim().is_empty() {
            return Ok(empty_state_object());
        }

        serde_json::from_str(&raw).map_err(|source| StorageError::Parse { path, source })
    }

    pub(crate) fn set(&self, key: &str, value: &Value) -> Result<(), StorageError> {
        let Some(path) = self.path_for_key(key)? else {
            crate::append_desktop_log(&format!(
                "storage directory is unavailable; skipping write of '{key}'"
            ));
            return Ok(());
        };

        if let Some(parent_dir) = path.parent() {
            fs::create_dir_all(parent_dir).map_err(|source| StorageError::Io {
                path: parent_dir.to_path_buf(),
                source,
            })?;
        }

        let serialized =
            serde_json::to_string_pretty(value).map_err(|source| StorageError::Serialize {
                key: key.to_string(),
                source,
            })?;

        let staging_path = path.with_extension("json.tmp");
        fs::write(&staging_path, serialized).map_err(|source| StorageError::Io {
            path: staging_path.clone(),
            source,
        })?;
        fs::rename(&staging_path, &path).map_err(|source| StorageError::Io { path, source })
    }
}

/// Older releases stored `archives` as a map keyed by id.
fn needs_legacy_migration(state: &Map<String, Value>) -> bool {
    state
        .get(ARCHIVES_FIELD)
        .is_some_and(|archives| !archives.is_array())
}

fn migrate_legacy_state(storage: &JsonStorage, state: &mut Map<String, Value>) {
    let backup = Value::Object(state.clone());
    if let Err(error) = storage.set(PERSISTED_STATE_BACKUP_KEY, &backup) {
        log::error!("failed to back up legacy state before migration: {error}");
    }

    append_startup_log("updating old state format to new");
    state.insert(ARCHIVES_FIELD.to_string(), Value::Array(Vec::new()));
    state.insert(SETTINGS_BY_ARCHIVE_FIELD.to_string(), empty_state_object());
}

/// Startup read of the persisted UI state. Any failure is logged and the app
/// starts from an empty state.
pub(crate) fn restore_app_state(storage: &JsonStorage) -> Value {
    let state = match storage.get(PERSISTED_STATE_KEY) {
        Ok(state) => state,
        Err(error) => {
            log::error!("unable to read state json file: {error}");
            return empty_state_object();
        }
    };

    let Value::Object(mut object) = state else {
        log::warn!("persisted state has a non-object root; starting from an empty state");
        return empty_state_object();
    };

    append_startup_log(&format!("restoring state ({} top-level keys)", object.len()));

    if needs_legacy_migration(&object) {
        migrate_legacy_state(storage, &mut object);
    }

    Value::Object(object)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn storage_in(dir: &tempfile::TempDir) -> JsonStorage {
        JsonStorage::new(Some(dir.path().join("storage")))
    }

    #[test]
    fn get_returns_empty_object_for_missing_key() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let storage = storage_in(&dir);
        assert_eq!(storage.get("state").expect("read"), json!({}));
    }

    #[test]
    fn set_then_get_returns_written_value_and_leaves_no_staging_file() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let storage = storage_in(&dir);
        let value = json!({ "archives": [{ "id": "a1" }] });

        storage.set("state", &value).expect("write");

        assert_eq!(storage.get("state").expect("read"), value);
        let storage_dir = dir.path().join("storage");
        assert!(storage_dir.join("state.json").is_file());
        assert!(!storage_dir.join("state.json.tmp").exists());
    }

    #[test]
    fn invalid_keys_are_rejected() {
        let storage = JsonStorage::new(None);
        for key in ["", "../state", "nested/state", " state"] {
            assert!(
                matches!(storage.get(key), Err(StorageError::InvalidKey(_))),
                "key {key:?} should be rejected"
            );
        }
    }

    #[test]
    fn storage_without_directory_reads_empty_and_skips_writes() {
        let storage = JsonStorage::new(None);
        storage.set("state", &json!({ "a": 1 })).expect("skip write");
        assert_eq!(storage.get("state").expect("read"), json!({}));
    }

    #[test]
    fn get_reports_parse_errors() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let storage = storage_in(&dir);
        let storage_dir = dir.path().join("storage");
        fs::create_dir_all(&storage_dir).expect("create storage dir");
        fs::write(storage_dir.join("state.json"), "{not json").expect("write");

        assert!(matches!(
            storage.get("state"),
            Err(StorageError::Parse { .. })
        ));
    }

    #[test]
    fn restore_app_state_treats_unreadable_state_as_empty() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let storage = storage_in(&dir);
        let storage_dir = dir.path().join("storage");
        fs::create_dir_all(&storage_dir).expect("create storage dir");
        fs::write(storage_dir.join("state.json"), "{not json").expect("write");

        assert_eq!(restore_app_state(&storage), json!({}));
    }

    #[test]
    fn restore_app_state_replaces_non_object_root() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let storage = storage_in(&dir);
        storage.set("state", &json!([1, 2, 3])).expect("write");

        assert_eq!(restore_app_state(&storage), json!({}));
    }

    #[test]
    fn restore_app_state_keeps_current_format_untouched() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let storage = storage_in(&dir);
        let state = json!({
            "archives": [{ "id": "a1" }],
            "settingsByArchiveId": { "a1": { "locked": true } }
        });
        storage.set("state", &state).expect("write");

        assert_eq!(restore_app_state(&storage), state);
        assert_eq!(storage.get("state.backup").expect("read"), json!({}));
    }

    #[test]
    fn restore_app_state_migrates_legacy_archive_map_and_keeps_backup() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let storage = storage_in(&dir);
        let legacy = json!({
            "archives": { "a1": { "name": "Personal" } },
            "settingsByArchiveId": { "a1": { "locked": false } },
            "ui": { "theme": "dark" }
        });
        storage.set("state", &legacy).expect("write");

        let restored = restore_app_state(&storage);

        assert_eq!(
            restored,
            json!({
                "archives": [],
                "settingsByArchiveId": {},
                "ui": { "theme": "dark" }
            })
        );
        assert_eq!(storage.get("state.backup").expect("read backup"), legacy);
    }
}
