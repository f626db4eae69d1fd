//! Vantaa Jobs ETL Library
//!
//! Fetches the city of Vantaa's open job postings feed, reshapes the raw
//! records into a fixed relational schema, and replaces the contents of a
//! destination table with the result.
//!
//! # Pipeline
//!
//! - **Extract**: one GET against the open-data endpoint, JSON array body
//! - **Transform**: fixed column rename, date coercion, optional strict
//!   coordinate/URL validation
//! - **Load**: idempotent schema creation and a transactional full-replace
//!
//! # Example
//!
//! ```no_run
//! use vantaa_etl::config::EtlConfig;
//! use vantaa_etl::pipeline;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let stats = pipeline::run_etl(
//!         EtlConfig::default(),
//!         "postgresql://localhost/vantaa",
//!     )
//!     .await?;
//!     println!("loaded {} postings", stats.records_loaded);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod extract;
pub mod load;
pub mod pipeline;
pub mod transform;
pub mod validate;

// Re-export main types
pub use config::EtlConfig;
pub use extract::{Extractor, RawRecord};
pub use load::{initialize_database, Loader, TABLE_NAME};
pub use pipeline::{run_etl, EtlPipeline, PipelineStats};
pub use transform::{JobPosting, Transformer, RENAME_SCHEMA};
pub use validate::BoundingBox;
