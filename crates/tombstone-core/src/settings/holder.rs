//! Named objects whose current value can be bulk-stored as settings.

use tracing::warn;

use super::backend::SettingsBackend;
use super::store::SettingsStore;

/// Anything with a setting name and a currently selected value
pub trait ValueHolder {
    fn name(&self) -> &str;

    fn selected_value(&self) -> &str;
}

impl<T: ValueHolder + ?Sized> ValueHolder for &T {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn selected_value(&self) -> &str {
        (**self).selected_value()
    }
}

impl<T: ValueHolder + ?Sized> ValueHolder for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn selected_value(&self) -> &str {
        (**self).selected_value()
    }
}

/// An option on a settings screen: a fixed list of values, one selected.
///
/// Tapping the item cycles through the values; the selection is what gets
/// stored by [`SettingsStore::retrieve_values`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsItem {
    name: String,
    values: Vec<String>,
    selected: usize,
}

impl SettingsItem {
    /// Create an item selecting its first value.
    ///
    /// An item needs at least one value; an empty list gets a single empty
    /// string so `selected_value` always has something to return.
    pub fn new<I, S>(name: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut values: Vec<String> = values.into_iter().map(Into::into).collect();
        if values.is_empty() {
            values.push(String::new());
        }
        Self {
            name: name.to_string(),
            values,
            selected: 0,
        }
    }

    /// Move to the next value, wrapping around after the last
    pub fn select_next(&mut self) -> &str {
        self.selected = (self.selected + 1) % self.values.len();
        &self.values[self.selected]
    }

    /// Select `value` if it is one of the options; returns whether it was
    pub fn select(&mut self, value: &str) -> bool {
        match self.values.iter().position(|v| v == value) {
            Some(index) => {
                self.selected = index;
                true
            }
            None => false,
        }
    }

    /// Restore the selection from a store, keeping `default` when the stored
    /// value is absent or not one of the options
    pub fn load_from<B: SettingsBackend>(&mut self, store: &SettingsStore<B>, default: &str) {
        let stored = store.get_string(&self.name, default);
        if !self.select(&stored) && !self.select(default) {
            warn!(
                "Setting {} has value {:?} outside its options, keeping {:?}",
                self.name,
                stored,
                self.selected_value()
            );
        }
    }
}

impl ValueHolder for SettingsItem {
    fn name(&self) -> &str {
        &self.name
    }

    fn selected_value(&self) -> &str {
        &self.values[self.selected]
    }
}
