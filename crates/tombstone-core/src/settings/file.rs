//! JSON file backend
//!
//! Keeps the whole map in memory and writes it back after every mutation,
//! so settings survive the process being killed between calls.

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::backend::SettingsBackend;
use crate::error::{Error, Result};

#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FileBackend {
    /// Open a settings file, treating a missing file as empty.
    ///
    /// Nothing is written until the first mutation.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let content = match fs::read_to_string(&path).map_err(Error::from) {
            Ok(c) => c,
            Err(e) if e.is_not_found() => {
                debug!("Settings file {} not found, starting empty", path.display());
                return Ok(Self {
                    path,
                    values: BTreeMap::new(),
                });
            }
            Err(e) => return Err(e),
        };

        let values = parse_settings(&path, &content)?;
        info!(
            "Loaded {} settings from {}",
            values.len(),
            path.display()
        );
        Ok(Self { path, values })
    }

    /// Write `values` to disk via a sibling temp file and rename, then make
    /// them current. On failure the in-memory map is left untouched.
    fn commit(&mut self, values: BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(&values)?;
        let tmp_path = temp_path(&self.path);
        fs::write(&tmp_path, content)?;
        fs::rename(&tmp_path, &self.path)?;

        debug!("Saved {} settings to {}", values.len(), self.path.display());
        self.values = values;
        Ok(())
    }
}

fn parse_settings(path: &Path, content: &str) -> Result<BTreeMap<String, String>> {
    if content.trim().is_empty() {
        return Ok(BTreeMap::new());
    }

    let value: serde_json::Value = serde_json::from_str(content)?;
    let serde_json::Value::Object(map) = value else {
        return Err(Error::InvalidSettingsFile(path.to_path_buf()));
    };

    map.into_iter()
        .map(|(key, value)| match value {
            serde_json::Value::String(s) => Ok((key, s)),
            _ => Err(Error::InvalidSettingsFile(path.to_path_buf())),
        })
        .collect()
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("settings"));
    name.push(".tmp");
    path.with_file_name(name)
}

impl SettingsBackend for FileBackend {
    fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        let mut next = self.values.clone();
        next.insert(key.to_string(), value);
        self.commit(next)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if !self.values.contains_key(key) {
            return Ok(());
        }
        let mut next = self.values.clone();
        next.remove(key);
        self.commit(next)
    }

    fn clear(&mut self) -> Result<()> {
        self.commit(BTreeMap::new())
    }

    fn keys(&self) -> Vec<&str> {
        self.values.keys().map(String::as_str).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_opens_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");

        let backend = FileBackend::open(&path).unwrap();
        assert!(backend.keys().is_empty());
        assert!(!path.exists());
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let mut backend = FileBackend::open(&path).unwrap();
        backend.set("score", "1200".to_string()).unwrap();
        backend.set("difficulty", "hard".to_string()).unwrap();
        drop(backend);

        let reopened = FileBackend::open(&path).unwrap();
        assert_eq!(reopened.get("score"), Some("1200"));
        assert_eq!(reopened.get("difficulty"), Some("hard"));
        assert!(!temp_path(&path).exists());
    }

    #[test]
    fn test_clear_is_persisted() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");

        let mut backend = FileBackend::open(&path).unwrap();
        backend.set("score", "5".to_string()).unwrap();
        backend.clear().unwrap();

        let reopened = FileBackend::open(&path).unwrap();
        assert!(reopened.keys().is_empty());
    }

    #[test]
    fn test_non_string_values_are_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"score": 10}"#).unwrap();

        let err = FileBackend::open(&path).unwrap_err();
        assert!(matches!(err, Error::InvalidSettingsFile(_)));
    }

    #[test]
    fn test_garbage_file_is_json_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "not json").unwrap();

        let err = FileBackend::open(&path).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_file_is_pretty_sorted_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");

        let mut backend = FileBackend::open(&path).unwrap();
        backend.set("b", "2".to_string()).unwrap();
        backend.set("a", "1".to_string()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "{\n  \"a\": \"1\",\n  \"b\": \"2\"\n}");
    }

    /// A directory squatting on the temp path makes every write fail
    fn block_writes(path: &Path) {
        fs::create_dir_all(temp_path(path)).unwrap();
    }

    #[test]
    fn test_failed_set_leaves_values_unchanged() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");

        let mut backend = FileBackend::open(&path).unwrap();
        block_writes(&path);

        let err = backend.set("score", "50".to_string()).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
        assert!(!backend.contains("score"));
        assert!(!path.exists());
    }

    #[test]
    fn test_failed_remove_and_clear_keep_values() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");

        let mut backend = FileBackend::open(&path).unwrap();
        backend.set("score", "50".to_string()).unwrap();
        block_writes(&path);

        assert!(matches!(backend.remove("score"), Err(Error::Io(_))));
        assert_eq!(backend.get("score"), Some("50"));
        assert!(matches!(backend.clear(), Err(Error::Io(_))));
        assert_eq!(backend.get("score"), Some("50"));

        // Memory still matches what is on disk
        fs::remove_dir(temp_path(&path)).unwrap();
        let reopened = FileBackend::open(&path).unwrap();
        assert_eq!(reopened.get("score"), Some("50"));
    }
}
