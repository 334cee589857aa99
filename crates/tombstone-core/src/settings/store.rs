use tracing::debug;

use super::backend::SettingsBackend;
use super::holder::ValueHolder;
use super::value::{FromSetting, ToSetting};
use crate::error::Result;

/// Case-insensitive typed settings on top of a string backend.
///
/// Every name is lower-cased before it reaches the backend, so `"Score"`
/// and `"score"` address the same setting for every operation.
#[derive(Debug, Clone, Default)]
pub struct SettingsStore<B> {
    backend: B,
}

/// Normalized form of a setting name
pub fn normalize_name(name: &str) -> String {
    name.to_lowercase()
}

impl<B: SettingsBackend> SettingsStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Add a new setting or overwrite an existing one
    pub fn set_value<V: ToSetting>(&mut self, name: &str, value: V) -> Result<()> {
        let key = normalize_name(name);
        let raw = value.to_setting();
        if self.backend.contains(&key) {
            debug!("Updating setting {} = {:?}", key, raw);
        } else {
            debug!("Adding setting {} = {:?}", key, raw);
        }
        self.backend.set(&key, raw)
    }

    /// Read a setting, or `default` when it has never been set.
    ///
    /// The default is not written back. A stored value that does not parse
    /// as `V` is an error rather than a silent fallback.
    pub fn get_value<V: FromSetting>(&self, name: &str, default: V) -> Result<V> {
        let key = normalize_name(name);
        match self.backend.get(&key) {
            Some(raw) => V::from_setting(&key, raw),
            None => Ok(default),
        }
    }

    /// String read without having to build an owned default; any stored
    /// string is valid, so this cannot fail
    pub fn get_string(&self, name: &str, default: &str) -> String {
        self.backend
            .get(&normalize_name(name))
            .unwrap_or(default)
            .to_string()
    }

    /// Raw stored string, if any
    pub fn get_raw(&self, name: &str) -> Option<&str> {
        self.backend.get(&normalize_name(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.backend.contains(&normalize_name(name))
    }

    /// Remove every setting
    pub fn clear_values(&mut self) -> Result<()> {
        debug!("Clearing all settings");
        self.backend.clear()
    }

    /// Remove one setting; absent names are ignored
    pub fn delete_value(&mut self, name: &str) -> Result<()> {
        let key = normalize_name(name);
        if self.backend.contains(&key) {
            debug!("Deleting setting {}", key);
            self.backend.remove(&key)?;
        }
        Ok(())
    }

    /// Store the selected value of every holder, in order.
    ///
    /// Later holders overwrite earlier ones with the same name. Stops at the
    /// first failure, leaving earlier holders applied.
    pub fn retrieve_values<I>(&mut self, holders: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: ValueHolder,
    {
        let mut count = 0usize;
        for holder in holders {
            self.set_value(holder.name(), holder.selected_value())?;
            count += 1;
        }
        debug!("Retrieved {} settings from value holders", count);
        Ok(())
    }

    /// Normalized names of all settings, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .backend
            .keys()
            .into_iter()
            .map(str::to_string)
            .collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.backend.keys().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::settings::backend::MemoryBackend;
    use crate::settings::file::FileBackend;
    use crate::settings::holder::SettingsItem;
    use chrono::{NaiveDate, NaiveDateTime};

    fn store() -> SettingsStore<MemoryBackend> {
        SettingsStore::new(MemoryBackend::new())
    }

    /// Memory backend whose writes fail for one key, or for everything
    #[derive(Default)]
    struct FailingBackend {
        inner: MemoryBackend,
        fail_key: Option<&'static str>,
        fail_all: bool,
    }

    impl FailingBackend {
        fn check(&self, key: &str) -> Result<()> {
            if self.fail_all || self.fail_key == Some(key) {
                return Err(std::io::Error::other("disk full").into());
            }
            Ok(())
        }
    }

    impl SettingsBackend for FailingBackend {
        fn contains(&self, key: &str) -> bool {
            self.inner.contains(key)
        }

        fn get(&self, key: &str) -> Option<&str> {
            self.inner.get(key)
        }

        fn set(&mut self, key: &str, value: String) -> Result<()> {
            self.check(key)?;
            self.inner.set(key, value)
        }

        fn remove(&mut self, key: &str) -> Result<()> {
            self.check(key)?;
            self.inner.remove(key)
        }

        fn clear(&mut self) -> Result<()> {
            self.check("")?;
            self.inner.clear()
        }

        fn keys(&self) -> Vec<&str> {
            self.inner.keys()
        }
    }

    struct Pair(&'static str, &'static str);

    impl ValueHolder for Pair {
        fn name(&self) -> &str {
            self.0
        }

        fn selected_value(&self) -> &str {
            self.1
        }
    }

    #[test]
    fn test_round_trip_ignores_name_case() {
        let mut store = store();
        store.set_value("HighScore", 4200).unwrap();
        store.set_value("PLAYERNAME", "Ada").unwrap();
        store.set_value("volume", 0.5f32).unwrap();
        store.set_value("Sound", true).unwrap();

        assert_eq!(store.get_value("highscore", 0).unwrap(), 4200);
        assert_eq!(store.get_value("HIGHSCORE", 0).unwrap(), 4200);
        assert_eq!(store.get_string("playerName", ""), "Ada");
        assert_eq!(store.get_value("VOLUME", 1.0f32).unwrap(), 0.5);
        assert!(store.get_value("sound", false).unwrap());
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn test_timestamp_round_trip() {
        let when = NaiveDate::from_ymd_opt(2010, 12, 31)
            .unwrap()
            .and_hms_opt(23, 59, 58)
            .unwrap();
        let mut store = store();
        store.set_value("LastPlayed", when).unwrap();

        assert_eq!(store.get_raw("lastplayed"), Some("2010-12-31T23:59:58"));
        assert_eq!(
            store.get_value("lastPlayed", NaiveDateTime::default()).unwrap(),
            when
        );
    }

    #[test]
    fn test_set_overwrites_in_place() {
        let mut store = store();
        store.set_value("Score", 10).unwrap();
        store.set_value("score", 20).unwrap();

        assert_eq!(store.get_value("SCORE", 0).unwrap(), 20);
        assert_eq!(store.names(), vec!["score".to_string()]);
    }

    #[test]
    fn test_absent_returns_default_without_inserting() {
        let store = store();
        assert_eq!(store.get_value("missing", 7).unwrap(), 7);
        assert_eq!(store.get_string("missing", "fallback"), "fallback");
        assert!(!store.contains("missing"));
        assert!(store.is_empty());
    }

    #[test]
    fn test_malformed_value_is_not_masked_by_default() {
        let mut store = store();
        store.set_value("Score", "not a number").unwrap();

        let err = store.get_value("score", 0).unwrap_err();
        assert!(err.is_format());
        assert!(matches!(err, Error::Format { ref name, .. } if name == "score"));

        // The corrupt value is left for the caller to inspect
        assert_eq!(store.get_raw("score"), Some("not a number"));
    }

    #[test]
    fn test_clear_values() {
        let mut store = store();
        store.set_value("a", 1).unwrap();
        store.set_value("b", "two").unwrap();

        store.clear_values().unwrap();
        assert_eq!(store.get_value("a", -1).unwrap(), -1);
        assert_eq!(store.get_string("b", "none"), "none");

        store.clear_values().unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_delete_matches_any_case_and_is_idempotent() {
        let mut store = store();
        store.set_value("MusicVolume", 3).unwrap();
        store.set_value("keep", 1).unwrap();

        store.delete_value("MUSICVOLUME").unwrap();
        assert!(!store.contains("musicvolume"));
        let after_once = store.names();

        store.delete_value("MUSICVOLUME").unwrap();
        assert_eq!(store.names(), after_once);
        assert_eq!(after_once, vec!["keep".to_string()]);
    }

    #[test]
    fn test_retrieve_values_last_write_wins() {
        let mut store = store();
        store
            .retrieve_values([Pair("A", "1"), Pair("B", "2"), Pair("A", "3")])
            .unwrap();

        assert_eq!(store.get_string("A", ""), "3");
        assert_eq!(store.get_string("B", ""), "2");
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_retrieve_values_from_settings_items() {
        let mut difficulty = SettingsItem::new("Difficulty", ["Easy", "Normal", "Hard"]);
        difficulty.select_next();
        let sound = SettingsItem::new("Sound", ["On", "Off"]);
        let items = vec![difficulty, sound];

        let mut store = store();
        store.retrieve_values(&items).unwrap();

        assert_eq!(store.get_string("difficulty", ""), "Normal");
        assert_eq!(store.get_string("sound", ""), "On");
    }

    #[test]
    fn test_retrieve_values_stops_at_first_failure() {
        let mut store = SettingsStore::new(FailingBackend {
            fail_key: Some("b"),
            ..Default::default()
        });

        let err = store
            .retrieve_values([Pair("A", "1"), Pair("B", "2"), Pair("C", "3")])
            .unwrap_err();
        assert!(matches!(err, Error::Io(_)));

        // Earlier holders stay applied, the failing one and later ones do not
        assert_eq!(store.get_string("a", ""), "1");
        assert!(!store.contains("b"));
        assert!(!store.contains("c"));
    }

    #[test]
    fn test_backend_failures_surface_as_io_errors() {
        let mut store = SettingsStore::new(FailingBackend::default());
        store.set_value("Score", 10).unwrap();
        store.backend.fail_all = true;

        assert!(matches!(store.set_value("score", 20), Err(Error::Io(_))));
        assert!(matches!(store.delete_value("SCORE"), Err(Error::Io(_))));
        assert!(matches!(store.clear_values(), Err(Error::Io(_))));
        assert_eq!(store.get_value("score", 0).unwrap(), 10);
    }

    #[test]
    fn test_failed_file_write_is_not_visible() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        let mut store = SettingsStore::new(FileBackend::open(&path).unwrap());
        std::fs::create_dir_all(dir.path().join("settings.json.tmp")).unwrap();

        assert!(matches!(store.set_value("Score", 50), Err(Error::Io(_))));
        assert_eq!(store.get_value("score", -1).unwrap(), -1);
        let err = store
            .retrieve_values([Pair("A", "1"), Pair("B", "2")])
            .unwrap_err();
        assert!(matches!(err, Error::Io(_)));
        assert!(store.is_empty());
        assert!(!path.exists());
    }
}
