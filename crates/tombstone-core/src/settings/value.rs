//! Conversion between typed values and their stored string form.
//!
//! Every setting is stored as a string. Each supported type has exactly one
//! format/parse pair here, so the store itself stays type-agnostic.

use chrono::{DateTime, NaiveDateTime};

use crate::error::{Error, Result};

/// Format used for timestamps (sortable, second precision)
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Formats a value into its canonical stored string.
pub trait ToSetting {
    fn to_setting(&self) -> String;
}

/// Parses a stored string back into a typed value.
pub trait FromSetting: Sized {
    /// Human-readable type name used in format errors
    const TYPE_NAME: &'static str;

    /// `name` is the normalized setting name and only feeds the error.
    fn from_setting(name: &str, raw: &str) -> Result<Self>;
}

impl<T: ToSetting + ?Sized> ToSetting for &T {
    fn to_setting(&self) -> String {
        (**self).to_setting()
    }
}

impl ToSetting for str {
    fn to_setting(&self) -> String {
        self.to_string()
    }
}

impl ToSetting for String {
    fn to_setting(&self) -> String {
        self.clone()
    }
}

impl FromSetting for String {
    const TYPE_NAME: &'static str = "string";

    fn from_setting(_name: &str, raw: &str) -> Result<Self> {
        Ok(raw.to_string())
    }
}

macro_rules! impl_parsed_setting {
    ($($ty:ty => $type_name:literal),* $(,)?) => {
        $(
            impl ToSetting for $ty {
                fn to_setting(&self) -> String {
                    self.to_string()
                }
            }

            impl FromSetting for $ty {
                const TYPE_NAME: &'static str = $type_name;

                fn from_setting(name: &str, raw: &str) -> Result<Self> {
                    raw.trim()
                        .parse::<$ty>()
                        .map_err(|_| Error::format(name, raw, Self::TYPE_NAME))
                }
            }
        )*
    };
}

impl_parsed_setting! {
    i32 => "integer",
    i64 => "integer",
    u32 => "unsigned integer",
    f32 => "floating-point number",
    f64 => "floating-point number",
}

impl ToSetting for bool {
    fn to_setting(&self) -> String {
        self.to_string()
    }
}

impl FromSetting for bool {
    const TYPE_NAME: &'static str = "boolean";

    fn from_setting(name: &str, raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case("true") {
            Ok(true)
        } else if trimmed.eq_ignore_ascii_case("false") {
            Ok(false)
        } else {
            Err(Error::format(name, raw, Self::TYPE_NAME))
        }
    }
}

impl ToSetting for NaiveDateTime {
    fn to_setting(&self) -> String {
        self.format(TIMESTAMP_FORMAT).to_string()
    }
}

impl FromSetting for NaiveDateTime {
    const TYPE_NAME: &'static str = "timestamp";

    fn from_setting(name: &str, raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        NaiveDateTime::parse_from_str(trimmed, TIMESTAMP_FORMAT)
            .or_else(|_| DateTime::parse_from_rfc3339(trimmed).map(|dt| dt.naive_local()))
            .map_err(|_| Error::format(name, raw, Self::TYPE_NAME))
    }
}
