//! # Error Types
//!
//! Structured error types for tew_core. Every failure names the input field or
//! the analysis stage that produced it, so a reporting layer can show the
//! operator which panel configuration failed and why.
//!
//! ## Example
//!
//! ```rust
//! use tew_core::errors::{TewError, TewResult};
//!
//! fn validate_radius(radius_mm: f64) -> TewResult<()> {
//!     if radius_mm <= 0.0 {
//!         return Err(TewError::invalid_geometry(
//!             "radius_mm",
//!             radius_mm.to_string(),
//!             "Radius of curvature must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_radius(-1.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for tew_core operations
pub type TewResult<T> = Result<T, TewError>;

/// Structured error type for panel analysis operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum TewError {
    /// Malformed ply stack (empty, non-positive thickness, bad orientation or material)
    #[error("Invalid laminate '{field}': {value} - {reason}")]
    InvalidLaminate {
        field: String,
        value: String,
        reason: String,
    },

    /// Panel or stringer dimensions that cannot describe a real panel
    #[error("Invalid geometry '{field}': {value} - {reason}")]
    InvalidGeometry {
        field: String,
        value: String,
        reason: String,
    },

    /// Analysis settings or a load argument outside their valid range
    #[error("Invalid input '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// An iteration hit its cap before meeting its tolerance
    #[error("No convergence in {stage} after {iterations} iterations (residual {residual:.3e})")]
    Convergence {
        stage: String,
        iterations: usize,
        residual: f64,
    },

    /// The equivalent column section is degenerate
    #[error("Ill-conditioned section: {reason}")]
    IllConditionedSection { reason: String },

    /// Failure of one configuration, tagged with its identifier
    #[error("Case '{case_id}': {source}")]
    Case {
        case_id: String,
        #[source]
        source: Box<TewError>,
    },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },
}

impl TewError {
    /// Create an InvalidLaminate error
    pub fn invalid_laminate(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        TewError::InvalidLaminate {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidGeometry error
    pub fn invalid_geometry(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        TewError::InvalidGeometry {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        TewError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a Convergence error
    pub fn convergence(stage: impl Into<String>, iterations: usize, residual: f64) -> Self {
        TewError::Convergence {
            stage: stage.into(),
            iterations,
            residual,
        }
    }

    /// Create an IllConditionedSection error
    pub fn ill_conditioned(reason: impl Into<String>) -> Self {
        TewError::IllConditionedSection {
            reason: reason.into(),
        }
    }

    /// Tag this error with the configuration that produced it.
    ///
    /// Tagging an already tagged error keeps the innermost identifier.
    pub fn for_case(self, case_id: impl Into<String>) -> Self {
        match self {
            tagged @ TewError::Case { .. } => tagged,
            other => TewError::Case {
                case_id: case_id.into(),
                source: Box::new(other),
            },
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        TewError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Identifier of the configuration this error belongs to, if tagged
    pub fn case_id(&self) -> Option<&str> {
        match self {
            TewError::Case { case_id, .. } => Some(case_id),
            _ => None,
        }
    }

    /// The underlying error with any case tags removed
    pub fn root_cause(&self) -> &TewError {
        match self {
            TewError::Case { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Get a short error code for programmatic handling.
    ///
    /// Case tags are transparent: the code is that of the root cause.
    pub fn error_code(&self) -> &'static str {
        match self.root_cause() {
            TewError::InvalidLaminate { .. } => "INVALID_LAMINATE",
            TewError::InvalidGeometry { .. } => "INVALID_GEOMETRY",
            TewError::InvalidInput { .. } => "INVALID_INPUT",
            TewError::Convergence { .. } => "CONVERGENCE",
            TewError::IllConditionedSection { .. } => "ILL_CONDITIONED_SECTION",
            TewError::FileError { .. } => "FILE_ERROR",
            TewError::SerializationError { .. } => "SERIALIZATION_ERROR",
            TewError::VersionMismatch { .. } => "VERSION_MISMATCH",
            TewError::Case { .. } => "CASE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = TewError::invalid_geometry("stringer_pitch_mm", "0", "Pitch must be positive");
        let json = serde_json::to_string(&error).unwrap();
        let roundtrip: TewError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(TewError::ill_conditioned("zero width").error_code(), "ILL_CONDITIONED_SECTION");
        assert_eq!(TewError::convergence("effective width", 100, 1e-2).error_code(), "CONVERGENCE");
        assert_eq!(TewError::invalid_input("load_tolerance", "0", "").error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_case_tagging() {
        let error = TewError::invalid_laminate("plies", "[]", "Laminate has no plies").for_case("Case I");
        assert_eq!(error.case_id(), Some("Case I"));
        assert_eq!(error.error_code(), "INVALID_LAMINATE");
        assert!(error.to_string().starts_with("Case 'Case I'"));

        // Re-tagging keeps the original identifier
        let retagged = error.clone().for_case("Case II");
        assert_eq!(retagged, error);
    }

    #[test]
    fn test_tagged_error_serialization() {
        let error = TewError::convergence("collapse load", 200, 0.5).for_case("Case V");
        let json = serde_json::to_string_pretty(&error).unwrap();
        assert!(json.contains("\"Case\""));
        let roundtrip: TewError = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.root_cause(), error.root_cause());
    }
}
