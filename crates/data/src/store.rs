use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const STATE_PATH_ENV: &str = "SCORESHEET_STATE";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(String),
    #[error("serialize error: {0}")]
    Serialize(String),
}

impl From<std::io::Error> for StoreError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value.to_string())
    }
}

/// Persistence boundary: string keys to JSON values.
pub trait KeyValueStore {
    fn load(&self, key: &str) -> Option<Value>;
    fn save(&mut self, key: &str, value: Value) -> Result<(), StoreError>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self, key: &str) -> Option<Value> {
        self.entries.get(key).cloned()
    }

    fn save(&mut self, key: &str, value: Value) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}

/// All keys in one JSON object file. The file is rewritten whole on every
/// save through a temp file and a rename.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: Map<String, Value>,
    open_warning: Option<String>,
}

impl JsonFileStore {
    /// Opening never fails: a missing file starts empty, an unreadable one
    /// starts empty and leaves a warning behind.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let (entries, open_warning) = match read_entries(&path) {
            Ok(entries) => (entries, None),
            Err(err) => (
                Map::new(),
                Some(format!("discarding state file {}: {err}", path.display())),
            ),
        };
        Self {
            path,
            entries,
            open_warning,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn take_warning(&mut self) -> Option<String> {
        self.open_warning.take()
    }

    fn flush(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let body = serde_json::to_string_pretty(&self.entries)?;
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        fs::write(&tmp, body)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn load(&self, key: &str) -> Option<Value> {
        self.entries.get(key).cloned()
    }

    fn save(&mut self, key: &str, value: Value) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value);
        self.flush()
    }
}

fn read_entries(path: &Path) -> Result<Map<String, Value>, StoreError> {
    if !path.exists() {
        return Ok(Map::new());
    }
    let body = fs::read_to_string(path)?;
    match serde_json::from_str::<Value>(&body)? {
        Value::Object(entries) => Ok(entries),
        _ => Err(StoreError::Serialize("state file is not a JSON object".to_string())),
    }
}

pub fn default_state_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(STATE_PATH_ENV) {
        return Some(PathBuf::from(path));
    }
    std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".scoresheet_state.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::{SystemTime, UNIX_EPOCH};

    #[test]
    fn file_store_roundtrip() {
        let file = unique_temp_file();
        let mut store = JsonFileStore::open(&file);
        assert!(store.take_warning().is_none());
        store
            .save("yatzy-settings", json!({"dice_count": 5}))
            .expect("save");
        store.save("yatzy-hide-totals", json!(true)).expect("save");

        let reopened = JsonFileStore::open(&file);
        assert_eq!(
            reopened.load("yatzy-settings"),
            Some(json!({"dice_count": 5}))
        );
        assert_eq!(reopened.load("yatzy-hide-totals"), Some(json!(true)));
        assert_eq!(reopened.load("missing"), None);
        let _ = std::fs::remove_file(file);
    }

    #[test]
    fn corrupt_file_opens_empty_with_warning() {
        let file = unique_temp_file();
        std::fs::write(&file, "{ not json").expect("write");
        let mut store = JsonFileStore::open(&file);
        assert!(store.load("yatzy-players").is_none());
        let warning = store.take_warning().expect("warning");
        assert!(warning.contains("discarding state file"));
        assert!(store.take_warning().is_none());
        let _ = std::fs::remove_file(file);
    }

    #[test]
    fn non_object_file_is_rejected() {
        let file = unique_temp_file();
        std::fs::write(&file, "[1, 2, 3]").expect("write");
        let mut store = JsonFileStore::open(&file);
        assert!(store.take_warning().is_some());
        let _ = std::fs::remove_file(file);
    }

    #[test]
    fn memory_store_overwrites() {
        let mut store = MemoryStore::new();
        store.save("k", json!(1)).expect("save");
        store.save("k", json!(2)).expect("save");
        assert_eq!(store.load("k"), Some(json!(2)));
    }

    fn unique_temp_file() -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "scoresheet_store_test_{}_{}.json",
            std::process::id(),
            nanos
        ))
    }
}
