use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedEntity {
    #[serde(rename = "entity", alias = "name")]
    pub name: String,
    #[serde(rename = "type", alias = "attr_type", alias = "semantic_type", default)]
    pub semantic_type: String,
}

impl ExtractedEntity {
    pub fn new(name: impl Into<String>, semantic_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            semantic_type: semantic_type.into(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractionResult {
    #[serde(default)]
    pub entities: Vec<ExtractedEntity>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeduplicationResult {
    #[serde(rename = "deduplicated", alias = "items", default)]
    pub items: Vec<String>,
    /// Self-reported and advisory; models sometimes omit it.
    #[serde(default, deserialize_with = "lenient_confidence")]
    pub confidence: Option<f64>,
}

impl DeduplicationResult {
    pub fn new(items: Vec<String>, confidence: Option<f64>) -> Self {
        Self { items, confidence }
    }
}

/// Accepts `0.9`, `"0.9"` or `null`.
fn lenient_confidence<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(serde_json::Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}
