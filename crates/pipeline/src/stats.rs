use serde::Serialize;
use std::time::{Duration, Instant};

use crate::outcome::PipelineError;

/// Counters for one run of the pipeline.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunStats {
    pub urls_processed: usize,
    pub succeeded: usize,
    pub fetch_failures: usize,
    pub classification_failures: usize,
    pub rows_written: usize,
    pub elapsed_ms: u128,
}

impl RunStats {
    pub fn record_success(&mut self, rows: usize) {
        self.urls_processed += 1;
        self.succeeded += 1;
        self.rows_written += rows;
    }

    pub fn record_failure(&mut self, error: &PipelineError) {
        self.urls_processed += 1;
        match error {
            PipelineError::FetchUnavailable(_) => self.fetch_failures += 1,
            PipelineError::Classification(_) => self.classification_failures += 1,
        }
    }

    pub fn failed(&self) -> usize {
        self.fetch_failures + self.classification_failures
    }

    pub fn finish(&mut self, elapsed: Duration) {
        self.elapsed_ms = elapsed.as_millis();
    }
}

pub struct TimedOperation {
    start: Instant,
}

impl TimedOperation {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}
