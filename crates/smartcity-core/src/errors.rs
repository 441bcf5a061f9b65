//! Error taxonomy for knowledge base operations
//!
//! Every condition here is recoverable and returned to the caller; the engine
//! never aborts the process for them. Absence of an area is usually absorbed
//! into "no match" answers (false predicates, empty collections) and only
//! surfaces as [`CityError::NotFound`] where a resolved area is required.

use crate::area::AreaName;
use serde::{Deserialize, Serialize};

/// Unified error type for knowledge base operations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum CityError {
    /// A named area does not exist where a resolved area is required
    #[error("Area not found: {name}")]
    NotFound {
        /// Name that failed to resolve
        name: AreaName,
    },

    /// An aggregation input names an area that does not exist
    #[error("Aggregation failed, area missing from knowledge base: {name}")]
    MissingArea {
        /// First name in the input that failed to resolve
        name: AreaName,
    },

    /// An assertion targets a name that is already present
    #[error("Area already asserted: {name}")]
    DuplicateName {
        /// Name that is already stored
        name: AreaName,
    },

    /// Malformed selector, constraint or goal
    #[error("Invalid query: {reason}")]
    InvalidQuery {
        /// What was wrong with the query
        reason: String,
    },
}

impl CityError {
    /// Create a not found error
    pub fn not_found(name: impl Into<AreaName>) -> Self {
        Self::NotFound { name: name.into() }
    }

    /// Create a missing area error
    pub fn missing_area(name: impl Into<AreaName>) -> Self {
        Self::MissingArea { name: name.into() }
    }

    /// Create a duplicate name error
    pub fn duplicate_name(name: impl Into<AreaName>) -> Self {
        Self::DuplicateName { name: name.into() }
    }

    /// Create an invalid query error
    pub fn invalid_query(reason: impl Into<String>) -> Self {
        Self::InvalidQuery {
            reason: reason.into(),
        }
    }
}

/// Standard Result type for knowledge base operations
pub type Result<T> = std::result::Result<T, CityError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_the_area() {
        let err = CityError::missing_area("riverside");
        assert_eq!(
            err.to_string(),
            "Aggregation failed, area missing from knowledge base: riverside"
        );
    }

    #[test]
    fn test_constructors_fill_variants() {
        assert_eq!(
            CityError::duplicate_name("harbor"),
            CityError::DuplicateName {
                name: AreaName::new("harbor")
            }
        );
        assert_eq!(
            CityError::invalid_query("bad").to_string(),
            "Invalid query: bad"
        );
    }
}
