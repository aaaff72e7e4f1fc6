//! Unified error handling for the CFS card engine
//!
//! The discovery, resolution and calibration paths are total and never
//! produce errors. This crate covers the remaining boundary: turning the
//! host's configuration and state documents into typed values.
//! It uses thiserror for ergonomic error definitions with proper Display and Error trait impls.

/// Result type alias using CfsError
pub type Result<T> = std::result::Result<T, CfsError>;

/// Unified error type for all CFS card operations
#[derive(thiserror::Error, Debug)]
pub enum CfsError {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Invalid configuration value for {field}: {reason}")]
    InvalidConfig {
        field: String,
        reason: String,
    },

    // ============================================================================
    // State Snapshot Errors
    // ============================================================================
    #[error("Invalid state snapshot: {0}")]
    InvalidSnapshot(String),
}

impl CfsError {
    /// Create an invalid config error for a single field
    pub fn invalid_config(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid snapshot error from a string
    pub fn snapshot(msg: impl Into<String>) -> Self {
        Self::InvalidSnapshot(msg.into())
    }
}
