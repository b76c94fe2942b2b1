//! Vegetation district codes
//!
//! EVC codes reach us from GeoJSON properties and WMS responses, sometimes as
//! strings and sometimes as JSON numbers. [`VegetationCode`] normalises both
//! into the canonical decimal string used by the lookup table.

use std::fmt::{self, Display};

use serde::{Deserialize, Deserializer, Serialize};

/// Opaque identifier of a vegetation district
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct VegetationCode(String);

impl VegetationCode {
    /// Create a code from its textual form
    pub fn new(code: impl AsRef<str>) -> Self {
        Self(code.as_ref().trim().to_string())
    }

    /// Create a code from a JSON value, if it holds a string or number
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::String(s) if !s.trim().is_empty() => Some(Self::new(s)),
            serde_json::Value::Number(n) => Some(Self::from_number(n)),
            _ => None,
        }
    }

    fn from_number(n: &serde_json::Number) -> Self {
        if let Some(i) = n.as_i64() {
            return Self(i.to_string());
        }
        if let Some(u) = n.as_u64() {
            return Self(u.to_string());
        }
        match n.as_f64() {
            Some(f) if f.fract() == 0.0 && f.is_finite() => Self(format!("{}", f as i64)),
            _ => Self(n.to_string()),
        }
    }

    /// The code as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for VegetationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for VegetationCode {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for VegetationCode {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<u32> for VegetationCode {
    fn from(n: u32) -> Self {
        Self(n.to_string())
    }
}

impl<'de> Deserialize<'de> for VegetationCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Self::from_json(&value)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid EVC code: {}", value)))
    }
}
