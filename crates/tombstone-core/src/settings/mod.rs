//! Typed, case-insensitive settings persistence.
//!
//! - **Store**: typed get/set with default fallback over a string backend
//! - **Backends**: in-memory map and a JSON file that survives restarts
//! - **Value holders**: named options that can be bulk-stored
//!
//! ## Stored form
//!
//! Names are lower-cased and values are canonical strings; see
//! [`value`] for the per-type formats.

mod backend;
mod file;
mod holder;
mod store;
pub mod value;

pub use backend::{MemoryBackend, SettingsBackend};
pub use file::FileBackend;
pub use holder::{SettingsItem, ValueHolder};
pub use store::{SettingsStore, normalize_name};
pub use value::{FromSetting, TIMESTAMP_FORMAT, ToSetting};
