pub mod classifier;
pub mod dedup;
pub mod llm;
pub mod normalizer;
pub mod prompt;
pub mod schema;

pub use classifier::{ClassificationService, LlmClassifier};
pub use dedup::{structural_dedup, DedupConfig, Deduplicator};
pub use llm::{ChatClient, LlmConfig};
pub use normalizer::{entity_key, EntitySet};
pub use schema::{DeduplicationResult, ExtractedEntity, ExtractionResult};
