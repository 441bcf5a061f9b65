//! Constraint matching against area facts
//!
//! Each area is a single fact, so unifying a partially bound
//! `area(Name, Pop, Poll, Traffic, Energy, Waste)` pattern reduces to testing
//! every bound position for equality; unbound positions take the stored
//! values. A bound name turns the scan into an exact lookup.

use smartcity_core::{Area, AreaName, CityError, Field, FieldValue, Result};
use smartcity_store::FactSource;
use std::fmt;

/// An equality binding on one field
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Constraint {
    /// Bound field
    pub field: Field,
    /// Required value
    pub value: FieldValue,
}

impl Constraint {
    /// Bind a field to a value
    pub fn new(field: Field, value: impl Into<FieldValue>) -> Self {
        Self {
            field,
            value: value.into(),
        }
    }

    /// Bind the name field
    pub fn name(name: impl Into<AreaName>) -> Self {
        Self::new(Field::Name, name.into())
    }

    /// Reject constraints whose value cannot inhabit the field
    pub fn check(&self) -> Result<()> {
        match (&self.field, &self.value) {
            (Field::Name, FieldValue::Name(_)) => Ok(()),
            (Field::Population | Field::Metric(_), FieldValue::Integer(_)) => Ok(()),
            (field, value) => Err(CityError::invalid_query(format!(
                "field `{field}` cannot be bound to `{value}`"
            ))),
        }
    }

    /// Whether `area` satisfies this binding
    pub fn matches(&self, area: &Area) -> bool {
        area.field(self.field) == self.value
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.field, self.value)
    }
}

/// Evaluates `unify_city` style lookups over a fact source
pub struct Unifier<'a, S: FactSource + ?Sized> {
    source: &'a S,
}

impl<'a, S: FactSource + ?Sized> Unifier<'a, S> {
    /// Create a unifier over `source`
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    /// Every area satisfying all constraints, in source order.
    ///
    /// No constraints yields every area. An empty result is not an error.
    pub fn unify(&self, constraints: &[Constraint]) -> Result<Vec<Area>> {
        for constraint in constraints {
            constraint.check()?;
        }

        let bound_name = constraints.iter().find_map(|c| match &c.value {
            FieldValue::Name(name) if c.field == Field::Name => Some(name),
            _ => None,
        });

        let matches = match bound_name {
            Some(name) => self
                .source
                .lookup(name.as_str())
                .filter(|area| constraints.iter().all(|c| c.matches(area)))
                .into_iter()
                .collect(),
            None => self.source.scan(|areas| {
                areas
                    .filter(|area| constraints.iter().all(|c| c.matches(area)))
                    .cloned()
                    .collect::<Vec<_>>()
            }),
        };

        tracing::debug!(
            constraints = constraints.len(),
            matches = matches.len(),
            "Unified area facts"
        );
        Ok(matches)
    }
}
