// ETL Pipeline Orchestration
//
// One invocation is one strictly sequential read -> transform -> write
// chain. No stage retries, no stage is skipped, and a failure anywhere
// aborts the rest of the run.

use crate::config::EtlConfig;
use crate::extract::Extractor;
use crate::load::{self, Loader};
use crate::transform::Transformer;
use sqlx::PgPool;
use tracing::info;
use vantaa_common::Result;

/// The full extract-transform-load pipeline
pub struct EtlPipeline {
    config: EtlConfig,
    db: PgPool,
}

impl EtlPipeline {
    /// Create a new pipeline around an explicitly owned connection pool
    pub fn new(config: EtlConfig, db: PgPool) -> Self {
        EtlPipeline { config, db }
    }

    /// Run one full pass: fetch the feed, transform it, replace the table.
    pub async fn run(&self) -> Result<PipelineStats> {
        info!("Starting Vantaa job postings ETL");

        let extractor = Extractor::new(self.config.clone())?;

        info!("Step 1/3: Fetching raw records...");
        let raw = extractor.fetch().await?;

        info!("Step 2/3: Transforming {} records...", raw.len());
        let transformer = Transformer::from_config(&self.config);
        let postings = transformer.transform(&raw)?;

        info!("Step 3/3: Loading {} postings...", postings.len());
        let loader = Loader::with_chunk_size(self.db.clone(), self.config.insert_chunk_size);
        let records_loaded = loader.load(&postings).await?;

        let stats = PipelineStats {
            records_fetched: raw.len(),
            records_loaded,
        };

        info!(
            "ETL run completed: {} fetched, {} loaded",
            stats.records_fetched, stats.records_loaded
        );

        Ok(stats)
    }

    /// Get pipeline configuration
    pub fn config(&self) -> &EtlConfig {
        &self.config
    }
}

/// Pipeline statistics
#[derive(Debug, Clone)]
pub struct PipelineStats {
    pub records_fetched: usize,
    pub records_loaded: usize,
}

/// Run the full pipeline against the database at `database_url`.
pub async fn run_etl(config: EtlConfig, database_url: &str) -> Result<PipelineStats> {
    let pool = load::connect(database_url).await?;
    EtlPipeline::new(config, pool).run().await
}

// ============================================================================
// Tests
// ============================================================================
