//! Error types for the CFS card engine
//!
//! Re-exports the shared error crate so callers only need `cfs_core`.

pub use cfs_error::{CfsError, Result};
