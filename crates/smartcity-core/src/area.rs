//! Area facts
//!
//! An area fact is the tuple `area(Name, Pop, Poll, Traffic, Energy, Waste)`.
//! All five numeric fields are always present; partial facts do not exist.

use crate::selector::{Field, FieldValue, Metric};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Primary key of an area fact.
///
/// Names are compared verbatim. Callers are expected to hand in names that
/// have already gone through [`AreaName::normalize`]; the engine itself does
/// not rewrite keys, so `Downtown` and `downtown` are different atoms.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AreaName(String);

impl AreaName {
    /// Wrap a name without rewriting it
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Normalize user input into a key: trimmed, lowercase, spaces as underscores
    pub fn normalize(raw: &str) -> Self {
        Self(raw.trim().to_lowercase().replace(' ', "_"))
    }

    /// Borrow the key
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the key is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for AreaName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AreaName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for AreaName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl From<&AreaName> for AreaName {
    fn from(name: &AreaName) -> Self {
        name.clone()
    }
}

impl AsRef<str> for AreaName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for AreaName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// A city district and its measurements
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Area {
    /// Unique key
    pub name: AreaName,
    /// Number of residents
    pub population: u64,
    /// Pollution level
    pub pollution: i64,
    /// Traffic level
    pub traffic: i64,
    /// Energy demand level
    pub energy: i64,
    /// Waste level
    pub waste: i64,
}

impl Area {
    /// Create an area fact
    pub fn new(
        name: impl Into<AreaName>,
        population: u64,
        pollution: i64,
        traffic: i64,
        energy: i64,
        waste: i64,
    ) -> Self {
        Self {
            name: name.into(),
            population,
            pollution,
            traffic,
            energy,
            waste,
        }
    }

    /// Read one of the four integer metrics
    pub fn metric(&self, metric: Metric) -> i64 {
        match metric {
            Metric::Pollution => self.pollution,
            Metric::Traffic => self.traffic,
            Metric::Energy => self.energy,
            Metric::Waste => self.waste,
        }
    }

    /// Read any field as a comparable value
    pub fn field(&self, field: Field) -> FieldValue {
        match field {
            Field::Name => FieldValue::Name(self.name.clone()),
            Field::Population => FieldValue::Integer(i128::from(self.population)),
            Field::Metric(metric) => FieldValue::Integer(i128::from(self.metric(metric))),
        }
    }
}
