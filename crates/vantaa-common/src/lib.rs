//! Vantaa ETL Common Library
//!
//! Shared error handling, logging and filesystem utilities for the Vantaa
//! jobs ETL workspace.
//!
//! # Overview
//!
//! - **Error Handling**: the pipeline-wide error taxonomy and result alias
//! - **Logging**: tracing subscriber bootstrap with env-based configuration
//! - **Filesystem**: environment reset helper used by ops/test tooling
//!
//! # Example
//!
//! ```no_run
//! use vantaa_common::{EtlError, Result};
//!
//! fn parse_identifier(raw: Option<&str>) -> Result<String> {
//!     raw.map(str::to_owned)
//!         .ok_or_else(|| EtlError::missing_column("id"))
//! }
//! ```

pub mod error;
pub mod fs;
pub mod logging;

// Re-export commonly used types
pub use error::{EtlError, Result};
