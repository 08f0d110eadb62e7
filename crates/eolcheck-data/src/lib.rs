//! eolcheck-data: lifecycle data providers for eol-check
//!
//! - [`EndOfLifeClient`]: endoflife.date product API over HTTP
//! - [`FileCache`] / [`CachedSource`]: on-disk TTL cache in front of any
//!   [`eolcheck_core::LifecycleSource`]
//! - [`ai_models`]: curated AI model lifecycle catalog and SDK/model tables

pub mod ai_models;
pub mod cache;
pub mod client;
pub mod config;
pub mod error;

pub use ai_models::{
    model_cycles, model_patterns, provider_display_name, provider_models, providers,
    python_sdk_provider, sdk_provider, ModelPattern, MODEL_PATTERNS,
};
pub use cache::{CachedSource, FileCache};
pub use client::EndOfLifeClient;
pub use config::DataConfig;
pub use error::DataError;

/// Result type for data-layer operations
pub type Result<T> = std::result::Result<T, DataError>;

/// Build the default source stack: HTTP client behind the disk cache.
pub fn cached_client(config: &DataConfig, refresh: bool) -> Result<CachedSource<EndOfLifeClient>> {
    let client = EndOfLifeClient::new(config)?;
    let cache = FileCache::new(config.cache_dir.clone(), config.ttl());
    Ok(CachedSource::new(client, cache).with_refresh(refresh))
}
