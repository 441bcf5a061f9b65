//! The knowledge base façade
//!
//! [`KnowledgeBase`] owns the fact store and the service thresholds and
//! exposes every client-facing call. Each call builds the component it needs
//! over the store; components never talk to each other. The type is `Sync`,
//! so a concurrent host can share one instance behind an `Arc`.

use crate::aggregate::Aggregator;
use crate::collect::SetCollector;
use crate::goal::{Answer, Goal};
use crate::predicate::PredicateEngine;
use crate::quantify::QuantifierEvaluator;
use crate::unify::{Constraint, Unifier};
use serde::Serialize;
use smartcity_core::{
    Area, AreaName, CityError, Direction, EngineConfig, Metric, Result, Service,
    ServiceThresholds,
};
use smartcity_store::{FactStore, SeedError};

/// An area together with the services it needs
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AreaDetail {
    /// The stored fact
    #[serde(flatten)]
    pub area: Area,
    /// Services whose threshold the area exceeds
    pub services_needed: Vec<Service>,
}

/// Area facts plus the derived query vocabulary
#[derive(Debug)]
pub struct KnowledgeBase {
    store: FactStore,
    thresholds: ServiceThresholds,
}

impl KnowledgeBase {
    /// Create an empty knowledge base
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            store: FactStore::new(config.duplicate_policy),
            thresholds: config.services,
        }
    }

    /// Create a knowledge base and load the configured seed file, if any
    pub fn from_config(config: &EngineConfig) -> std::result::Result<Self, SeedError> {
        let kb = Self::new(config);
        if let Some(seed) = &config.seed {
            kb.store.load_seed(seed)?;
        }
        Ok(kb)
    }

    /// Create a knowledge base holding `areas`
    pub fn with_areas(
        config: &EngineConfig,
        areas: impl IntoIterator<Item = Area>,
    ) -> Result<Self> {
        let kb = Self::new(config);
        for area in areas {
            kb.assert_area(area)?;
        }
        Ok(kb)
    }

    /// The underlying store
    pub fn store(&self) -> &FactStore {
        &self.store
    }

    fn predicates(&self) -> PredicateEngine<'_, FactStore> {
        PredicateEngine::new(&self.store, self.thresholds)
    }

    /// Exact lookup
    pub fn lookup_area(&self, name: &str) -> Option<Area> {
        self.store.get(name)
    }

    /// Every area in store order
    pub fn list_areas(&self) -> Vec<Area> {
        self.store.all()
    }

    /// An area and the services it needs; fails with `NotFound`
    pub fn area_detail(&self, name: &str) -> Result<AreaDetail> {
        let area = self
            .store
            .get(name)
            .ok_or_else(|| CityError::not_found(name))?;
        let services_needed = self.predicates().services_needed(name);
        Ok(AreaDetail {
            area,
            services_needed,
        })
    }

    /// Details for every name that resolves, in input order
    pub fn compare(&self, names: &[AreaName]) -> Vec<AreaDetail> {
        names
            .iter()
            .filter_map(|name| self.area_detail(name.as_str()).ok())
            .collect()
    }

    /// `can_service(name, service)`
    pub fn needs_service(&self, name: &str, service: Service) -> bool {
        self.predicates().can_service(name, service)
    }

    /// Every service the area needs; empty for unknown areas
    pub fn services_needed(&self, name: &str) -> Vec<Service> {
        self.predicates().services_needed(name)
    }

    /// Names of areas whose `metric` compares to `threshold` in `direction`
    pub fn collect_by_threshold(
        &self,
        metric: Metric,
        direction: Direction,
        threshold: i64,
    ) -> Vec<AreaName> {
        SetCollector::new(&self.store).collect(metric, direction, threshold)
    }

    /// `suggest_by_<metric>(threshold, L)`
    pub fn suggest_by(&self, metric: Metric, threshold: i64) -> Vec<AreaName> {
        SetCollector::new(&self.store).suggest_by(metric, threshold)
    }

    /// `areas_with_pollution_below(threshold, L)`
    pub fn areas_with_pollution_below(&self, threshold: i64) -> Vec<AreaName> {
        SetCollector::new(&self.store).areas_with_pollution_below(threshold)
    }

    /// `sum_population(names, Sum)`; fails with `MissingArea`
    pub fn sum_population(&self, names: &[AreaName]) -> Result<u64> {
        Aggregator::new(&self.store).sum_population(names)
    }

    /// Per-name populations; fails with `MissingArea`
    pub fn population_breakdown(&self, names: &[AreaName]) -> Result<Vec<(AreaName, u64)>> {
        Aggregator::new(&self.store).population_breakdown(names)
    }

    /// `unify_city` with the given bindings
    pub fn unify(&self, constraints: &[Constraint]) -> Result<Vec<Area>> {
        Unifier::new(&self.store).unify(constraints)
    }

    /// `forall_<metric>_below(threshold)`
    pub fn forall_below(&self, metric: Metric, threshold: i64) -> bool {
        QuantifierEvaluator::new(&self.store).forall_below(metric, threshold)
    }

    /// `exists_<metric>_above(threshold)`
    pub fn exists_above(&self, metric: Metric, threshold: i64) -> bool {
        QuantifierEvaluator::new(&self.store).exists_above(metric, threshold)
    }

    /// `assertz(area(...))`; returns the replaced fact under `Overwrite`
    pub fn assert_area(&self, area: Area) -> Result<Option<Area>> {
        self.store.insert(area)
    }

    /// Evaluate a parsed goal
    pub fn solve(&self, goal: &Goal) -> Result<Answer> {
        tracing::debug!(%goal, "Solving goal");
        let answer = match goal {
            Goal::Unify(constraints) => Answer::Areas(self.unify(constraints)?),
            Goal::CanService { name, service } => {
                Answer::Truth(self.needs_service(name.as_str(), *service))
            }
            Goal::ServicesNeeded { name } => {
                Answer::Services(self.services_needed(name.as_str()))
            }
            Goal::Collect {
                metric,
                direction,
                threshold,
            } => Answer::Names(self.collect_by_threshold(*metric, *direction, *threshold)),
            Goal::SumPopulation(names) => Answer::Total(self.sum_population(names)?),
            Goal::ForallBelow { metric, threshold } => {
                Answer::Truth(self.forall_below(*metric, *threshold))
            }
            Goal::ExistsAbove { metric, threshold } => {
                Answer::Truth(self.exists_above(*metric, *threshold))
            }
            Goal::Assert(area) => Answer::Asserted {
                replaced: self.assert_area(area.clone())?,
            },
        };
        Ok(answer)
    }

    /// Parse and evaluate goal text
    pub fn query(&self, text: &str) -> Result<Answer> {
        let goal: Goal = text.parse().map_err(|err: CityError| {
            tracing::warn!(goal = text, error = %err, "Rejected goal");
            err
        })?;
        self.solve(&goal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use smartcity_core::DuplicatePolicy;

    fn kb() -> KnowledgeBase {
        KnowledgeBase::with_areas(
            &EngineConfig::default(),
            [
                Area::new("downtown", 50_000, 80, 90, 60, 70),
                Area::new("suburb", 20_000, 20, 30, 40, 25),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_area_detail_lists_services() {
        let detail = kb().area_detail("downtown").unwrap();
        assert_eq!(detail.area.population, 50_000);
        assert_eq!(
            detail.services_needed,
            vec![Service::Waste, Service::Traffic]
        );
    }

    #[test]
    fn test_area_detail_not_found() {
        assert_matches!(
            kb().area_detail("atlantis"),
            Err(CityError::NotFound { name }) if name.as_str() == "atlantis"
        );
    }

    #[test]
    fn test_compare_skips_unknown() {
        let names = ["suburb", "atlantis", "downtown"].map(AreaName::new);
        let compared: Vec<_> = kb()
            .compare(&names)
            .into_iter()
            .map(|d| d.area.name)
            .collect();
        assert_eq!(
            compared,
            vec![AreaName::new("suburb"), AreaName::new("downtown")]
        );
    }

    #[test]
    fn test_solve_assert_then_lookup() {
        let kb = kb();
        assert_eq!(
            kb.query("assertz(area(harbor, 8000, 45, 40, 55, 35))"),
            Ok(Answer::Asserted { replaced: None })
        );
        assert_eq!(
            kb.query("area(harbor)"),
            Ok(Answer::Areas(vec![Area::new("harbor", 8_000, 45, 40, 55, 35)]))
        );
        assert_matches!(
            kb.query("assertz(area(harbor, 1, 1, 1, 1, 1))"),
            Err(CityError::DuplicateName { .. })
        );
    }

    #[test]
    fn test_overwrite_policy_reports_replaced_fact() {
        let config = EngineConfig {
            duplicate_policy: DuplicatePolicy::Overwrite,
            ..EngineConfig::default()
        };
        let kb = KnowledgeBase::with_areas(&config, [Area::new("suburb", 1, 1, 1, 1, 1)]).unwrap();
        assert_eq!(
            kb.solve(&Goal::Assert(Area::new("suburb", 2, 2, 2, 2, 2))),
            Ok(Answer::Asserted {
                replaced: Some(Area::new("suburb", 1, 1, 1, 1, 1))
            })
        );
    }

    #[test]
    fn test_solve_each_goal_kind() {
        let kb = kb();
        assert_eq!(kb.query("can_service(downtown, energy)"), Ok(Answer::Truth(false)));
        assert_eq!(
            kb.query("can_service(downtown, S)"),
            Ok(Answer::Services(vec![Service::Waste, Service::Traffic]))
        );
        assert_eq!(
            kb.query("suggest_by_pollution(50, L)"),
            Ok(Answer::Names(vec![AreaName::new("downtown")]))
        );
        assert_eq!(
            kb.query("areas_with_pollution_below(50, L)"),
            Ok(Answer::Names(vec![AreaName::new("suburb")]))
        );
        assert_eq!(
            kb.query("sum_population([downtown, suburb], Sum)"),
            Ok(Answer::Total(70_000))
        );
        assert_eq!(kb.query("forall_pollution_below(100)"), Ok(Answer::Truth(true)));
        assert_eq!(kb.query("exists_traffic_above(85)"), Ok(Answer::Truth(true)));
        assert_matches!(
            kb.query("sum_population([downtown, nowhere], Sum)"),
            Err(CityError::MissingArea { .. })
        );
    }

    #[test]
    fn test_seed_loaded_from_config() {
        let dir = tempfile::tempdir().unwrap();
        let seed = dir.path().join("areas.toml");
        std::fs::write(
            &seed,
            "[[area]]\nname = \"harbor\"\npopulation = 8000\npollution = 45\ntraffic = 40\nenergy = 55\nwaste = 35\n",
        )
        .unwrap();
        let config = EngineConfig {
            seed: Some(seed),
            ..EngineConfig::default()
        };
        let kb = KnowledgeBase::from_config(&config).unwrap();
        assert_eq!(kb.list_areas().len(), 1);
        assert!(kb.lookup_area("harbor").is_some());
    }
}
