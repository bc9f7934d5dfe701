pub mod artifacts;
pub mod config;
pub mod driver;
pub mod outcome;
pub mod stats;

pub use artifacts::ArtifactWriter;
pub use config::{AppConfig, LlmSettings};
pub use driver::Pipeline;
pub use outcome::{PipelineError, TagRow, UrlOutcome};
pub use stats::RunStats;
