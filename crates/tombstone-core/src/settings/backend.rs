use std::collections::HashMap;

use crate::error::Result;

/// Flat string-to-string storage underneath the settings store.
///
/// Keys arrive already normalized; backends compare them exactly.
pub trait SettingsBackend {
    fn contains(&self, key: &str) -> bool;

    fn get(&self, key: &str) -> Option<&str>;

    fn set(&mut self, key: &str, value: String) -> Result<()>;

    fn remove(&mut self, key: &str) -> Result<()>;

    fn clear(&mut self) -> Result<()>;

    /// All keys currently stored, in no particular order
    fn keys(&self) -> Vec<&str>;
}

/// Non-durable backend for tests and callers that do not need persistence
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    values: HashMap<String, String>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsBackend for MemoryBackend {
    fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.values.remove(key);
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.values.clear();
        Ok(())
    }

    fn keys(&self) -> Vec<&str> {
        self.values.keys().map(String::as_str).collect()
    }
}
