//! Collect-all-solutions queries
//!
//! `suggest_by_<metric>(T, L)` collects names with `metric > T`;
//! `areas_with_pollution_below(T, L)` collects names with `pollution < T`.
//! Both are a single filtered scan; the result follows source order and
//! carries no duplicates because names are unique.

use smartcity_core::{AreaName, Direction, Metric};
use smartcity_store::FactSource;

/// Evaluates threshold collections over a fact source
pub struct SetCollector<'a, S: FactSource + ?Sized> {
    source: &'a S,
}

impl<'a, S: FactSource + ?Sized> SetCollector<'a, S> {
    /// Create a collector over `source`
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    /// Names of every area whose `metric` compares to `threshold` in `direction`
    pub fn collect(&self, metric: Metric, direction: Direction, threshold: i64) -> Vec<AreaName> {
        let names: Vec<AreaName> = self.source.scan(|areas| {
            areas
                .filter(|area| direction.holds(area.metric(metric), threshold))
                .map(|area| area.name.clone())
                .collect()
        });
        tracing::debug!(
            %metric,
            op = direction.symbol(),
            threshold,
            matches = names.len(),
            "Collected areas"
        );
        names
    }

    /// `suggest_by_<metric>`: names with `metric > threshold`
    pub fn suggest_by(&self, metric: Metric, threshold: i64) -> Vec<AreaName> {
        self.collect(metric, Direction::Above, threshold)
    }

    /// `areas_with_pollution_below`: names with `pollution < threshold`
    pub fn areas_with_pollution_below(&self, threshold: i64) -> Vec<AreaName> {
        self.collect(Metric::Pollution, Direction::Below, threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smartcity_core::Area;

    fn areas() -> Vec<Area> {
        vec![
            Area::new("downtown", 50_000, 80, 90, 60, 70),
            Area::new("suburb", 20_000, 20, 30, 40, 25),
            Area::new("harbor", 8_000, 50, 40, 55, 35),
        ]
    }

    fn names(raw: &[&str]) -> Vec<AreaName> {
        raw.iter().map(|n| AreaName::new(*n)).collect()
    }

    #[test]
    fn test_suggest_is_strictly_above() {
        let areas = areas();
        let collector = SetCollector::new(areas.as_slice());
        assert_eq!(collector.suggest_by(Metric::Pollution, 50), names(&["downtown"]));
        assert_eq!(
            collector.suggest_by(Metric::Pollution, 49),
            names(&["downtown", "harbor"])
        );
    }

    #[test]
    fn test_below_is_strictly_below() {
        let areas = areas();
        let collector = SetCollector::new(areas.as_slice());
        assert_eq!(collector.areas_with_pollution_below(50), names(&["suburb"]));
        assert_eq!(
            collector.areas_with_pollution_below(51),
            names(&["suburb", "harbor"])
        );
    }

    #[test]
    fn test_directions_are_not_complements() {
        let areas = areas();
        let collector = SetCollector::new(areas.as_slice());
        // harbor sits on the threshold and belongs to neither side
        let above = collector.collect(Metric::Pollution, Direction::Above, 50);
        let below = collector.collect(Metric::Pollution, Direction::Below, 50);
        assert_eq!(above.len() + below.len(), 2);
    }

    #[test]
    fn test_negative_threshold_matches_everything_above() {
        let areas = areas();
        let collector = SetCollector::new(areas.as_slice());
        assert_eq!(collector.suggest_by(Metric::Waste, -1).len(), 3);
        assert!(collector.areas_with_pollution_below(-1).is_empty());
    }

    #[test]
    fn test_empty_source_is_empty_result() {
        let areas: Vec<Area> = Vec::new();
        let collector = SetCollector::new(areas.as_slice());
        assert!(collector.suggest_by(Metric::Traffic, 0).is_empty());
    }
}
