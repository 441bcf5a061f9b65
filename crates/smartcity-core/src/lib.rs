//! # Smart City Core
//!
//! **Purpose**: Domain types shared by the fact store, the query engine and the
//! client.
//!
//! An [`Area`] is a named city district with a population count and four
//! integer metrics (pollution, traffic, energy, waste). Areas are the only
//! kind of fact the knowledge base stores; every query is phrased in terms of
//! the closed selector sets defined here ([`Metric`], [`Service`], [`Field`],
//! [`Direction`]).
//!
//! ## What's NOT in this crate
//!
//! - Fact storage and locking (belongs in `smartcity-store`)
//! - Query evaluation (belongs in `smartcity-query`)
//! - Input normalization beyond [`AreaName::normalize`] and all rendering
//!   (belongs in the client)

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Area facts and area names
pub mod area;

/// Engine configuration (duplicate policy, service thresholds, seed path)
pub mod config;

/// Unified error types
pub mod errors;

/// Closed selector sets: metrics, services, fields and comparison directions
pub mod selector;

pub use area::{Area, AreaName};
pub use config::{ConfigError, DuplicatePolicy, EngineConfig, ServiceThresholds};
pub use errors::{CityError, Result};
pub use selector::{Direction, Field, FieldValue, Metric, Service};
