//! # Smart City Store
//!
//! **Purpose**: Own every area fact and serialize mutation against readers.
//!
//! The [`FactStore`] is the only persistent state of the knowledge base. Any
//! number of queries may read it concurrently; assertion takes an exclusive
//! write lock. Iteration order is insertion order and is stable for the
//! lifetime of the store.
//!
//! Query components read through the [`FactSource`] trait so they can be
//! evaluated against the live store or a detached snapshot.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Seed fact files
pub mod seed;

/// The guarded fact store
pub mod store;

pub use seed::{load_seed_file, parse_seed, SeedError};
pub use store::{FactSource, FactStore};
