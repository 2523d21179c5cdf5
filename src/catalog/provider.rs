//! Track catalog providers.
//!
//! A provider hands back raw records tagged with their source bucket. It
//! owns any fetching policy (limits, retries, parallelism); the engine only
//! consumes the completed list.

use super::models::SourceBucket;
use crate::error::{MoodifyError, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Default number of records taken from each bucket.
pub const DEFAULT_CANDIDATE_LIMIT: usize = 50;

/// Source of raw candidate records.
#[cfg_attr(feature = "mock", mockall::automock)]
#[async_trait]
pub trait TrackCatalogProvider: Send + Sync {
    /// Raw records for the top, recent and saved buckets.
    async fn fetch_candidates(&self) -> Result<Vec<(Value, SourceBucket)>>;
}

/// Provider serving a fixed list of records.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    records: Vec<(Value, SourceBucket)>,
}

impl InMemoryCatalog {
    pub fn new(records: Vec<(Value, SourceBucket)>) -> Self {
        Self { records }
    }
}

#[async_trait]
impl TrackCatalogProvider for InMemoryCatalog {
    async fn fetch_candidates(&self) -> Result<Vec<(Value, SourceBucket)>> {
        Ok(self.records.clone())
    }
}

/// Provider reading an exported listening history from a JSON file.
///
/// The file holds one entry per bucket, either a plain array of records or
/// a paging object with an `items` array:
///
/// ```json
/// { "top": [...], "recent": { "items": [...] }, "saved": { "items": [...] } }
/// ```
///
/// Missing buckets are treated as empty.
pub struct JsonFileCatalog {
    path: PathBuf,
    limit_per_bucket: usize,
}

impl JsonFileCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            limit_per_bucket: DEFAULT_CANDIDATE_LIMIT,
        }
    }

    pub fn with_limit(mut self, limit_per_bucket: usize) -> Self {
        self.limit_per_bucket = limit_per_bucket;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn records_from_document(&self, document: &Value) -> Vec<(Value, SourceBucket)> {
        let mut records = Vec::new();
        for bucket in SourceBucket::ALL {
            let entries: &[Value] = match document.get(bucket.as_str()) {
                Some(Value::Array(items)) => items.as_slice(),
                Some(paged) => match paged.get("items").and_then(Value::as_array) {
                    Some(items) => items.as_slice(),
                    None => {
                        warn!(bucket = %bucket, "Bucket is neither an array nor a paging object");
                        &[]
                    }
                },
                None => &[],
            };

            debug!(bucket = %bucket, count = entries.len(), "Read catalog bucket");
            records.extend(
                entries
                    .iter()
                    .take(self.limit_per_bucket)
                    .map(|raw| (raw.clone(), bucket)),
            );
        }
        records
    }
}

#[async_trait]
impl TrackCatalogProvider for JsonFileCatalog {
    async fn fetch_candidates(&self) -> Result<Vec<(Value, SourceBucket)>> {
        let content = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            MoodifyError::Catalog(format!("Failed to read catalog file {:?}: {}", self.path, e))
        })?;
        let document: Value = serde_json::from_str(&content).map_err(|e| {
            MoodifyError::Catalog(format!("Failed to parse catalog file {:?}: {}", self.path, e))
        })?;
        Ok(self.records_from_document(&document))
    }
}
