//! Service predicates
//!
//! `can_service(Name, Service)` holds iff the area exists and the service's
//! metric is strictly above the configured threshold. An unknown area makes
//! the predicate false rather than an error.

use smartcity_core::{Service, ServiceThresholds};
use smartcity_store::FactSource;

/// Evaluates `can_service` over a fact source
pub struct PredicateEngine<'a, S: FactSource + ?Sized> {
    source: &'a S,
    thresholds: ServiceThresholds,
}

impl<'a, S: FactSource + ?Sized> PredicateEngine<'a, S> {
    /// Create a predicate engine with the given service thresholds
    pub fn new(source: &'a S, thresholds: ServiceThresholds) -> Self {
        Self { source, thresholds }
    }

    /// Whether the named area needs `service`
    pub fn can_service(&self, name: &str, service: Service) -> bool {
        let needed = self.source.lookup(name).is_some_and(|area| {
            area.metric(service.metric()) > self.thresholds.threshold(service)
        });
        tracing::debug!(name, %service, needed, "Evaluated can_service");
        needed
    }

    /// Every service the named area needs, in waste, traffic, energy order
    pub fn services_needed(&self, name: &str) -> Vec<Service> {
        let Some(area) = self.source.lookup(name) else {
            return Vec::new();
        };
        Service::ALL
            .into_iter()
            .filter(|service| area.metric(service.metric()) > self.thresholds.threshold(*service))
            .collect()
    }
}
