// ETL Configuration

use crate::validate::BoundingBox;
use serde::{Deserialize, Serialize};

/// Endpoint serving the city's current open job postings as a JSON array.
pub const VANTAA_API_URL: &str = "http://gis.vantaa.fi/rest/tyopaikat/v1/kaikki";

/// Configuration for one ETL run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EtlConfig {
    /// Source feed URL
    pub api_url: String,

    /// HTTP timeout in seconds
    pub timeout_secs: u64,

    /// Reject batches whose coordinates fall outside `bounds`
    pub validate_coordinates: bool,

    /// Reject batches containing malformed link URLs
    pub validate_urls: bool,

    /// Accepted coordinate region when coordinate validation is enabled
    pub bounds: BoundingBox,

    /// Rows per INSERT statement during the load
    pub insert_chunk_size: usize,
}

impl Default for EtlConfig {
    fn default() -> Self {
        EtlConfig {
            api_url: VANTAA_API_URL.to_string(),
            timeout_secs: 30,
            validate_coordinates: false,
            validate_urls: false,
            bounds: BoundingBox::vantaa(),
            insert_chunk_size: 500,
        }
    }
}

impl EtlConfig {
    /// Create new config with builder pattern
    pub fn builder() -> EtlConfigBuilder {
        EtlConfigBuilder::default()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.api_url.is_empty() {
            return Err("API URL cannot be empty".to_string());
        }

        if self.timeout_secs == 0 {
            return Err("Timeout must be greater than 0".to_string());
        }

        if self.insert_chunk_size == 0 {
            return Err("Insert chunk size must be greater than 0".to_string());
        }

        if self.bounds.lon_min > self.bounds.lon_max || self.bounds.lat_min > self.bounds.lat_max {
            return Err("Bounding box minimums must not exceed maximums".to_string());
        }

        Ok(())
    }
}

/// Builder for EtlConfig
#[derive(Debug, Default)]
pub struct EtlConfigBuilder {
    api_url: Option<String>,
    timeout_secs: Option<u64>,
    validate_coordinates: Option<bool>,
    validate_urls: Option<bool>,
    bounds: Option<BoundingBox>,
    insert_chunk_size: Option<usize>,
}

impl EtlConfigBuilder {
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = Some(url.into());
        self
    }

    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    pub fn validate_coordinates(mut self, enabled: bool) -> Self {
        self.validate_coordinates = Some(enabled);
        self
    }

    pub fn validate_urls(mut self, enabled: bool) -> Self {
        self.validate_urls = Some(enabled);
        self
    }

    pub fn bounds(mut self, bounds: BoundingBox) -> Self {
        self.bounds = Some(bounds);
        self
    }

    pub fn insert_chunk_size(mut self, size: usize) -> Self {
        self.insert_chunk_size = Some(size);
        self
    }

    pub fn build(self) -> EtlConfig {
        let default = EtlConfig::default();

        EtlConfig {
            api_url: self.api_url.unwrap_or(default.api_url),
            timeout_secs: self.timeout_secs.unwrap_or(default.timeout_secs),
            validate_coordinates: self
                .validate_coordinates
                .unwrap_or(default.validate_coordinates),
            validate_urls: self.validate_urls.unwrap_or(default.validate_urls),
            bounds: self.bounds.unwrap_or(default.bounds),
            insert_chunk_size: self.insert_chunk_size.unwrap_or(default.insert_chunk_size),
        }
    }
}

// ============================================================================
// Preset Configurations
// ============================================================================

impl EtlConfig {
    /// Configuration with coordinate and URL validation enabled
    pub fn strict() -> Self {
        EtlConfig {
            validate_coordinates: true,
            validate_urls: true,
            ..EtlConfig::default()
        }
    }
}

// ============================================================================
// Environment Variable Support
// ============================================================================

impl EtlConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let default = EtlConfig::default();

        EtlConfig {
            api_url: std::env::var("VANTAA_API_URL").unwrap_or(default.api_url),
            timeout_secs: std::env::var("ETL_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(default.timeout_secs),
            validate_coordinates: std::env::var("ETL_VALIDATE_COORDINATES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(default.validate_coordinates),
            validate_urls: std::env::var("ETL_VALIDATE_URLS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(default.validate_urls),
            bounds: default.bounds,
            insert_chunk_size: std::env::var("ETL_INSERT_CHUNK_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(default.insert_chunk_size),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
