//! Seed fact files
//!
//! The initial knowledge base is a TOML file of `[[area]]` tables:
//!
//! ```toml
//! [[area]]
//! name = "downtown"
//! population = 50000
//! pollution = 80
//! traffic = 90
//! energy = 60
//! waste = 70
//! ```
//!
//! Seed facts go through the same assertion path as client assertions, so
//! the store's duplicate policy applies to them too.

use crate::store::FactStore;
use serde::Deserialize;
use smartcity_core::{Area, CityError};
use std::path::{Path, PathBuf};

/// Errors raised while loading seed facts
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    /// Seed file could not be read
    #[error("Failed to read seed file {path}: {reason}")]
    Read {
        /// File that failed
        path: PathBuf,
        /// Underlying I/O error
        reason: String,
    },

    /// Seed file is not a valid fact file
    #[error("Failed to parse seed facts: {reason}")]
    Parse {
        /// Parser message
        reason: String,
    },

    /// A seed fact was refused by the store
    #[error("Seed fact rejected: {0}")]
    Rejected(#[from] CityError),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SeedFile {
    #[serde(default)]
    area: Vec<Area>,
}

/// Parse seed facts from TOML text, in file order
pub fn parse_seed(content: &str) -> Result<Vec<Area>, SeedError> {
    let file: SeedFile = toml::from_str(content).map_err(|e| SeedError::Parse {
        reason: e.to_string(),
    })?;
    Ok(file.area)
}

/// Read and parse a seed fact file
pub fn load_seed_file(path: &Path) -> Result<Vec<Area>, SeedError> {
    let content = std::fs::read_to_string(path).map_err(|e| SeedError::Read {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_seed(&content)
}

impl FactStore {
    /// Assert every fact of a seed file, stopping at the first rejection.
    ///
    /// Returns the number of facts asserted.
    pub fn load_seed(&self, path: &Path) -> Result<usize, SeedError> {
        let areas = load_seed_file(path)?;
        let count = areas.len();
        for area in areas {
            self.insert(area)?;
        }
        tracing::info!(path = %path.display(), count, "Loaded seed facts");
        Ok(count)
    }
}
