//! # Smart City Query
//!
//! **Purpose**: Evaluate the knowledge base's fixed predicate vocabulary over
//! area facts.
//!
//! Each query family is its own component, built over any
//! [`FactSource`](smartcity_store::FactSource):
//!
//! - [`Unifier`]: `area/6`, `unify_city/6` (constraint matching)
//! - [`PredicateEngine`]: `can_service/2`
//! - [`SetCollector`]: `suggest_by_<metric>/2`, `areas_with_<metric>_below/2`
//! - [`Aggregator`]: `sum_population/2` (all-or-nothing fold)
//! - [`QuantifierEvaluator`]: `forall_<metric>_below/1`, `exists_<metric>_above/1`
//!
//! [`KnowledgeBase`] bundles them over a [`FactStore`](smartcity_store::FactStore)
//! and evaluates textual [`Goal`]s.
//!
//! ```text
//! Client ─► KnowledgeBase ─► { Unifier | PredicateEngine | SetCollector
//!                              | Aggregator | QuantifierEvaluator } ─► FactStore
//! ```
//!
//! This is not a general logic interpreter: there are no user clauses, no
//! backtracking across rules, and no clause introspection.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// `sum_population` aggregation
pub mod aggregate;

/// Collect-all-solutions threshold queries
pub mod collect;

/// Goal syntax and answers
pub mod goal;

/// The client-facing façade
pub mod knowledge_base;

/// `can_service` predicates
pub mod predicate;

/// `forall` / `exists` quantifiers
pub mod quantify;

/// Constraint matching
pub mod unify;

pub use aggregate::Aggregator;
pub use collect::SetCollector;
pub use goal::{Answer, Goal};
pub use knowledge_base::{AreaDetail, KnowledgeBase};
pub use predicate::PredicateEngine;
pub use quantify::QuantifierEvaluator;
pub use unify::{Constraint, Unifier};
