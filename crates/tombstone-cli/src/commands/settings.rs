//! Settings commands: set, get, delete, clear, list and bulk apply.

use anyhow::{Context, Result, bail};
use chrono::NaiveDateTime;
use tombstone_core::{
    FileBackend, FromSetting, SettingsBackend, SettingsStore, ToSetting, TombstoneConfig,
    ValueHolder, normalize_name,
};
use tracing::info;

use crate::cli::ValueKind;

/// One `name=value` argument of `apply`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    name: String,
    value: String,
}

impl Assignment {
    pub fn parse(arg: &str) -> Result<Self> {
        let Some((name, value)) = arg.split_once('=') else {
            bail!("Expected name=value, got {:?}", arg);
        };
        if name.trim().is_empty() {
            bail!("Missing setting name in {:?}", arg);
        }
        Ok(Self {
            name: name.trim().to_string(),
            value: value.to_string(),
        })
    }
}

impl ValueHolder for Assignment {
    fn name(&self) -> &str {
        &self.name
    }

    fn selected_value(&self) -> &str {
        &self.value
    }
}

fn open_store(config: &TombstoneConfig) -> Result<SettingsStore<FileBackend>> {
    let ctx = config.open_context().with_context(|| {
        format!(
            "Failed to open settings file {}",
            config.settings_path.display()
        )
    })?;
    Ok(ctx.into_settings())
}

fn parse_arg<T: FromSetting>(name: &str, raw: &str) -> Result<T> {
    Ok(T::from_setting(name, raw)?)
}

/// Validate `value` as `kind` and store its canonical form
pub fn store_typed<B: SettingsBackend>(
    store: &mut SettingsStore<B>,
    name: &str,
    value: &str,
    kind: ValueKind,
) -> Result<()> {
    let key = normalize_name(name);
    match kind {
        ValueKind::String => store.set_value(name, value)?,
        ValueKind::Int => store.set_value(name, parse_arg::<i64>(&key, value)?)?,
        ValueKind::Float => store.set_value(name, parse_arg::<f64>(&key, value)?)?,
        ValueKind::Bool => store.set_value(name, parse_arg::<bool>(&key, value)?)?,
        ValueKind::Date => store.set_value(name, parse_arg::<NaiveDateTime>(&key, value)?)?,
    }
    Ok(())
}

/// Read `name` as `kind` and format it for display
pub fn read_typed<B: SettingsBackend>(
    store: &SettingsStore<B>,
    name: &str,
    kind: ValueKind,
    default: Option<&str>,
) -> Result<String> {
    let value = match kind {
        ValueKind::String => store.get_string(name, default.unwrap_or("")),
        ValueKind::Int => {
            let default: Option<i64> = default.map(|d| parse_arg("--default", d)).transpose()?;
            store.get_value(name, default.unwrap_or(0))?.to_string()
        }
        ValueKind::Float => {
            let default: Option<f64> = default.map(|d| parse_arg("--default", d)).transpose()?;
            store.get_value(name, default.unwrap_or(0.0))?.to_string()
        }
        ValueKind::Bool => {
            let default: Option<bool> = default.map(|d| parse_arg("--default", d)).transpose()?;
            store.get_value(name, default.unwrap_or(false))?.to_string()
        }
        ValueKind::Date => {
            let default: Option<NaiveDateTime> =
                default.map(|d| parse_arg("--default", d)).transpose()?;
            store.get_value(name, default.unwrap_or_default())?.to_setting()
        }
    };
    Ok(value)
}

pub fn set(config: &TombstoneConfig, name: &str, value: &str, kind: ValueKind) -> Result<()> {
    let mut store = open_store(config)?;
    store_typed(&mut store, name, value, kind)?;
    info!("Stored {}", normalize_name(name));
    Ok(())
}

pub fn get(
    config: &TombstoneConfig,
    name: &str,
    kind: ValueKind,
    default: Option<&str>,
) -> Result<()> {
    let store = open_store(config)?;
    println!("{}", read_typed(&store, name, kind, default)?);
    Ok(())
}

pub fn delete(config: &TombstoneConfig, name: &str) -> Result<()> {
    let mut store = open_store(config)?;
    store.delete_value(name)?;
    Ok(())
}

pub fn clear(config: &TombstoneConfig) -> Result<()> {
    let mut store = open_store(config)?;
    store.clear_values()?;
    info!("Cleared all settings");
    Ok(())
}

pub fn list(config: &TombstoneConfig, json: bool) -> Result<()> {
    let store = open_store(config)?;
    let names = store.names();

    if json {
        let map: serde_json::Map<String, serde_json::Value> = names
            .iter()
            .map(|name| {
                let value = store.get_raw(name).unwrap_or_default().to_string();
                (name.clone(), serde_json::Value::String(value))
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&map)?);
    } else {
        for name in &names {
            println!("{}\t{}", name, store.get_raw(name).unwrap_or_default());
        }
    }
    Ok(())
}

pub fn apply(config: &TombstoneConfig, assignments: &[String]) -> Result<()> {
    let holders = assignments
        .iter()
        .map(|arg| Assignment::parse(arg))
        .collect::<Result<Vec<_>>>()?;

    let mut store = open_store(config)?;
    store.retrieve_values(&holders)?;
    info!("Applied {} settings", holders.len());
    Ok(())
}
