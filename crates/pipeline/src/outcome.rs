use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a URL produced no tags. Neither variant stops the run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("no content could be fetched from {0}")]
    FetchUnavailable(String),
    #[error("classification failed: {0:#}")]
    Classification(anyhow::Error),
}

/// One raw (pre-deduplication) entity of one source page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagRow {
    pub link: String,
    pub tag: String,
    pub tag_type: String,
}

#[derive(Debug)]
pub enum UrlOutcome {
    Success { rows: Vec<TagRow>, diagram: String },
    Failure(PipelineError),
}

impl UrlOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, UrlOutcome::Success { .. })
    }
}
