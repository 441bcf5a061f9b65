//! Population aggregation over an explicit name list
//!
//! `sum_population([N | Ns], Sum)` is a left fold starting at zero. The fold
//! is all-or-nothing: the first name that does not resolve fails the whole
//! query with `MissingArea`, never a partial sum. Duplicate names are counted
//! once per occurrence.

use smartcity_core::{AreaName, CityError, Result};
use smartcity_store::FactSource;

/// Evaluates `sum_population` over a fact source
pub struct Aggregator<'a, S: FactSource + ?Sized> {
    source: &'a S,
}

impl<'a, S: FactSource + ?Sized> Aggregator<'a, S> {
    /// Create an aggregator over `source`
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    /// Resolve every name to its population, in input order
    pub fn population_breakdown(&self, names: &[AreaName]) -> Result<Vec<(AreaName, u64)>> {
        names
            .iter()
            .map(|name| {
                self.source
                    .lookup(name.as_str())
                    .map(|area| (area.name, area.population))
                    .ok_or_else(|| CityError::missing_area(name))
            })
            .collect()
    }

    /// Total population of `names`; an empty list sums to zero
    pub fn sum_population(&self, names: &[AreaName]) -> Result<u64> {
        let total = names.iter().try_fold(0u64, |total, name| {
            let area = self
                .source
                .lookup(name.as_str())
                .ok_or_else(|| CityError::missing_area(name))?;
            total
                .checked_add(area.population)
                .ok_or_else(|| CityError::invalid_query("population sum overflows"))
        });

        match &total {
            Ok(sum) => tracing::debug!(names = names.len(), sum, "Summed population"),
            Err(err) => tracing::debug!(names = names.len(), error = %err, "Population sum failed"),
        }
        total
    }
}
