pub mod diagram;
pub mod synthesizer;

pub use diagram::{filter_triples, node_id, render_failure, render_mermaid};
pub use synthesizer::{PredicateMode, RelationSynthesizer, SynthesisConfig};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Triple {
    pub subject: String,
    pub predicate: String,
    pub object: String,
}

impl Triple {
    pub fn new(
        subject: impl Into<String>,
        predicate: impl Into<String>,
        object: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
        }
    }
}
