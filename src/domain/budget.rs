use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use super::{format_cents, parse_cents, Cents};

/// Marker shown in reports for a budget or savings goal that was never set.
pub const NOT_SET: &str = "Not set";

/// A per-user spending ceiling as it appears in reports.
///
/// Threshold checks treat an absent budget or goal as 0; reports keep the
/// absence visible instead. Serializes like its `Display` form: a decimal
/// amount such as `"500.00"`, or `"Not set"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Limit {
    Set(Cents),
    #[default]
    NotSet,
}

impl Limit {
    /// Value used when comparing against spending.
    pub fn threshold(&self) -> Cents {
        match self {
            Limit::Set(cents) => *cents,
            Limit::NotSet => 0,
        }
    }
}

impl From<Option<Cents>> for Limit {
    fn from(value: Option<Cents>) -> Self {
        value.map_or(Limit::NotSet, Limit::Set)
    }
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Limit::Set(cents) => f.write_str(&format_cents(*cents)),
            Limit::NotSet => f.write_str(NOT_SET),
        }
    }
}

impl Serialize for Limit {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Limit::Set(cents) => serializer.serialize_str(&format_cents(*cents)),
            Limit::NotSet => serializer.serialize_str(NOT_SET),
        }
    }
}

impl<'de> Deserialize<'de> for Limit {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if raw == NOT_SET {
            return Ok(Limit::NotSet);
        }
        parse_cents(&raw).map(Limit::Set).map_err(|_| {
            serde::de::Error::custom(format!(
                "expected an amount or \"{}\", got \"{}\"",
                NOT_SET, raw
            ))
        })
    }
}
