use anyhow::{Context, Result};
use extract::{ChatClient, ClassificationService, Deduplicator, LlmClassifier, LlmConfig};
use fetch::ContentFetcher;
use graph::RelationSynthesizer;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};

use crate::artifacts::ArtifactWriter;
use crate::config::AppConfig;
use crate::outcome::{PipelineError, TagRow, UrlOutcome};
use crate::stats::{RunStats, TimedOperation};

/// Processes URLs one at a time: fetch, extract, deduplicate, synthesize,
/// render.
pub struct Pipeline {
    fetcher: ContentFetcher,
    classifier: Box<dyn ClassificationService>,
    deduplicator: Deduplicator,
    synthesizer: RelationSynthesizer,
    rng: StdRng,
}

impl Pipeline {
    pub fn new(
        fetcher: ContentFetcher,
        classifier: Box<dyn ClassificationService>,
        deduplicator: Deduplicator,
        synthesizer: RelationSynthesizer,
    ) -> Self {
        Self {
            fetcher,
            classifier,
            deduplicator,
            synthesizer,
            rng: StdRng::from_entropy(),
        }
    }

    pub fn from_config(config: &AppConfig, llm: &LlmConfig) -> Result<Self> {
        let fetcher = ContentFetcher::new(&config.fetch).context("Failed to build content fetcher")?;
        let client = ChatClient::new(llm)?;

        Ok(Self::new(
            fetcher,
            Box::new(LlmClassifier::new(client)),
            Deduplicator::new(&config.dedup),
            RelationSynthesizer::new(&config.synthesis),
        ))
    }

    /// Fixes the predicate choices of the synthesizer.
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    pub async fn process_url(&mut self, url: &str) -> UrlOutcome {
        let Some(text) = self.fetcher.fetch(url).await else {
            return UrlOutcome::Failure(PipelineError::FetchUnavailable(url.to_string()));
        };

        match self.classify(url, &text).await {
            Ok((rows, diagram)) => UrlOutcome::Success { rows, diagram },
            Err(e) => UrlOutcome::Failure(PipelineError::Classification(e)),
        }
    }

    async fn classify(&mut self, url: &str, text: &str) -> Result<(Vec<TagRow>, String)> {
        let entities = self.classifier.extract_entities(text).await?;
        let raw: Vec<String> = entities.iter().map(|e| e.name.clone()).collect();

        let deduplicated = self
            .deduplicator
            .deduplicate(self.classifier.as_ref(), &raw)
            .await?;

        let triples = self.synthesizer.synthesize(&deduplicated, &mut self.rng);
        let diagram = graph::render_mermaid(&triples, &deduplicated);

        info!(
            url = %url,
            entities = raw.len(),
            unique = deduplicated.len(),
            triples = triples.len(),
            "Classified page"
        );

        let rows = entities
            .into_iter()
            .map(|e| TagRow {
                link: url.to_string(),
                tag: e.name,
                tag_type: e.semantic_type,
            })
            .collect();

        Ok((rows, diagram))
    }

    /// Runs every URL in order. Each URL gets a diagram file, a failure
    /// diagram when it could not be processed; the tag table is written once
    /// at the end. Only artifact I/O errors end the run early.
    pub async fn run(&mut self, urls: &[String], writer: &ArtifactWriter) -> Result<RunStats> {
        let timer = TimedOperation::start();
        let mut stats = RunStats::default();
        let mut rows = Vec::new();

        for (i, url) in urls.iter().enumerate() {
            let index = i + 1;
            info!(url = %url, "[{}/{}] Processing", index, urls.len());

            match self.process_url(url).await {
                UrlOutcome::Success { rows: url_rows, diagram } => {
                    writer.write_diagram(index, &diagram)?;
                    stats.record_success(url_rows.len());
                    rows.extend(url_rows);
                }
                UrlOutcome::Failure(error) => {
                    warn!(url = %url, error = %error, "Skipping URL");
                    writer.write_diagram(index, &graph::render_failure(url, &error.to_string()))?;
                    stats.record_failure(&error);
                }
            }
        }

        let tags_path = writer.write_tags(&rows)?;
        stats.finish(timer.elapsed());

        info!(
            processed = stats.urls_processed,
            succeeded = stats.succeeded,
            failed = stats.failed(),
            rows = stats.rows_written,
            elapsed_ms = stats.elapsed_ms as u64,
            tags = %tags_path.display(),
            "Run complete"
        );

        Ok(stats)
    }
}
