//! Closed selector sets used by queries
//!
//! Selectors arrive as text from clients; parsing an unknown tag is a caller
//! bug and yields [`CityError::InvalidQuery`] rather than a silent default.

use crate::area::AreaName;
use crate::errors::CityError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the four integer measurements of an area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    /// Pollution level
    Pollution,
    /// Traffic level
    Traffic,
    /// Energy demand level
    Energy,
    /// Waste level
    Waste,
}

impl Metric {
    /// Every metric, in field order
    pub const ALL: [Metric; 4] = [
        Metric::Pollution,
        Metric::Traffic,
        Metric::Energy,
        Metric::Waste,
    ];

    /// Lowercase tag
    pub fn as_str(self) -> &'static str {
        match self {
            Metric::Pollution => "pollution",
            Metric::Traffic => "traffic",
            Metric::Energy => "energy",
            Metric::Waste => "waste",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Metric {
    type Err = CityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pollution" => Ok(Metric::Pollution),
            "traffic" => Ok(Metric::Traffic),
            "energy" => Ok(Metric::Energy),
            "waste" => Ok(Metric::Waste),
            other => Err(CityError::invalid_query(format!("unknown metric `{other}`"))),
        }
    }
}

/// A city service that an area may need
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Service {
    /// Waste collection
    Waste,
    /// Traffic management
    Traffic,
    /// Energy supply
    Energy,
}

impl Service {
    /// Every service, in the order clients check them
    pub const ALL: [Service; 3] = [Service::Waste, Service::Traffic, Service::Energy];

    /// The metric that decides whether this service is needed
    pub fn metric(self) -> Metric {
        match self {
            Service::Waste => Metric::Waste,
            Service::Traffic => Metric::Traffic,
            Service::Energy => Metric::Energy,
        }
    }

    /// Lowercase tag
    pub fn as_str(self) -> &'static str {
        self.metric().as_str()
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Service {
    type Err = CityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "waste" => Ok(Service::Waste),
            "traffic" => Ok(Service::Traffic),
            "energy" => Ok(Service::Energy),
            other => Err(CityError::invalid_query(format!("unknown service `{other}`"))),
        }
    }
}

/// Comparison direction of a threshold query.
///
/// `Above` is strict `>` and `Below` is strict `<`. The two are kept apart
/// rather than folded into one comparator with a sign flip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// `value > threshold`
    Above,
    /// `value < threshold`
    Below,
}

impl Direction {
    /// Whether `value` satisfies this direction against `threshold`
    pub fn holds(self, value: i64, threshold: i64) -> bool {
        match self {
            Direction::Above => value > threshold,
            Direction::Below => value < threshold,
        }
    }

    /// Comparison operator as text
    pub fn symbol(self) -> &'static str {
        match self {
            Direction::Above => ">",
            Direction::Below => "<",
        }
    }
}

impl FromStr for Direction {
    type Err = CityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ">" | "above" => Ok(Direction::Above),
            "<" | "below" => Ok(Direction::Below),
            other => Err(CityError::invalid_query(format!(
                "unknown comparison `{other}`"
            ))),
        }
    }
}

/// A field of an area fact that a constraint can bind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// The key
    Name,
    /// Population count
    Population,
    /// One of the four metrics
    Metric(Metric),
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Name => f.write_str("name"),
            Field::Population => f.write_str("population"),
            Field::Metric(metric) => f.write_str(metric.as_str()),
        }
    }
}

impl FromStr for Field {
    type Err = CityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Field::Name),
            "population" | "pop" => Ok(Field::Population),
            other => other
                .parse::<Metric>()
                .map(Field::Metric)
                .map_err(|_| CityError::invalid_query(format!("unknown field `{other}`"))),
        }
    }
}

/// A value bound to a field.
///
/// Integers are widened to `i128` so population (`u64`) and metrics (`i64`)
/// compare without loss.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldValue {
    /// An area key
    Name(AreaName),
    /// An integer measurement
    Integer(i128),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Name(name) => f.write_str(name.as_str()),
            FieldValue::Integer(n) => write!(f, "{n}"),
        }
    }
}

impl From<AreaName> for FieldValue {
    fn from(name: AreaName) -> Self {
        FieldValue::Name(name)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Integer(i128::from(n))
    }
}

impl From<u64> for FieldValue {
    fn from(n: u64) -> Self {
        FieldValue::Integer(i128::from(n))
    }
}
