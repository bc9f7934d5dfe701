use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::classifier::ClassificationService;
use crate::normalizer::{entity_key, EntitySet};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DedupConfig {
    pub target_confidence: f64,
    pub max_attempts: usize,
    pub retry_delay_ms: u64,
}

impl Default for DedupConfig {
    fn default() -> Self {
        Self {
            target_confidence: 0.9,
            max_attempts: 5,
            retry_delay_ms: 0,
        }
    }
}

/// Confidence-gated deduplication: asks the model up to `max_attempts`
/// times and accepts the first answer at or above `target_confidence`,
/// otherwise falls back to exact-match set deduplication.
pub struct Deduplicator {
    target_confidence: f64,
    max_attempts: usize,
    retry_delay: Duration,
}

impl Deduplicator {
    pub fn new(config: &DedupConfig) -> Self {
        Self {
            target_confidence: config.target_confidence,
            max_attempts: config.max_attempts,
            retry_delay: Duration::from_millis(config.retry_delay_ms),
        }
    }

    /// Collaborator errors are returned to the caller; a confidence that
    /// never reaches the target is not an error.
    pub async fn deduplicate(
        &self,
        service: &dyn ClassificationService,
        items: &[String],
    ) -> Result<Vec<String>> {
        let known = EntitySet::new(items);

        for attempt in 1..=self.max_attempts {
            let result = service.deduplicate(items).await?;

            match result.confidence {
                Some(confidence) if confidence >= self.target_confidence => {
                    let accepted = retain_known(result.items, &known);
                    info!(
                        attempt,
                        confidence,
                        kept = accepted.len(),
                        from = items.len(),
                        "Deduplication accepted"
                    );
                    return Ok(accepted);
                }
                confidence => {
                    debug!(
                        attempt,
                        max_attempts = self.max_attempts,
                        confidence = ?confidence,
                        target = self.target_confidence,
                        "Deduplication confidence below target"
                    );
                }
            }

            if attempt < self.max_attempts && !self.retry_delay.is_zero() {
                sleep(self.retry_delay).await;
            }
        }

        warn!(
            attempts = self.max_attempts,
            target = self.target_confidence,
            "Confidence target not reached, using structural deduplication"
        );
        Ok(structural_dedup(items))
    }
}

/// Exact-match set of `items`. Order is unspecified.
pub fn structural_dedup(items: &[String]) -> Vec<String> {
    items
        .iter()
        .cloned()
        .collect::<HashSet<_>>()
        .into_iter()
        .collect()
}

/// Drops model output that is not one of the input entities, and repeats of
/// the same entity under a different case.
fn retain_known(candidates: Vec<String>, known: &EntitySet) -> Vec<String> {
    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .map(|c| c.trim().to_string())
        .filter(|c| {
            if !known.contains(c) {
                debug!(entity = %c, "Dropping entity not present in the input");
                return false;
            }
            seen.insert(entity_key(c))
        })
        .collect()
}
