//! Universal and existential quantifiers over the whole fact set
//!
//! `forall_<metric>_below(T)` is vacuously true on an empty store and
//! `exists_<metric>_above(T)` is vacuously false. Both stop scanning as soon
//! as the answer is known.

use smartcity_core::{Direction, Metric};
use smartcity_store::FactSource;

/// Evaluates quantified threshold predicates over a fact source
pub struct QuantifierEvaluator<'a, S: FactSource + ?Sized> {
    source: &'a S,
}

impl<'a, S: FactSource + ?Sized> QuantifierEvaluator<'a, S> {
    /// Create an evaluator over `source`
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    /// Whether every area has `metric < threshold`
    pub fn forall_below(&self, metric: Metric, threshold: i64) -> bool {
        let holds = self.source.scan(|mut areas| {
            areas.all(|area| Direction::Below.holds(area.metric(metric), threshold))
        });
        tracing::debug!(%metric, threshold, holds, "Evaluated forall below");
        holds
    }

    /// Whether some area has `metric > threshold`
    pub fn exists_above(&self, metric: Metric, threshold: i64) -> bool {
        let holds = self.source.scan(|mut areas| {
            areas.any(|area| Direction::Above.holds(area.metric(metric), threshold))
        });
        tracing::debug!(%metric, threshold, holds, "Evaluated exists above");
        holds
    }
}
