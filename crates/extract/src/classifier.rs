use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::debug;

use crate::llm::ChatClient;
use crate::prompt;
use crate::schema::{DeduplicationResult, ExtractedEntity, ExtractionResult};

/// The two model-backed calls the pipeline depends on.
#[async_trait]
pub trait ClassificationService: Send + Sync {
    /// Named entities in `text`, each with a semantic type.
    async fn extract_entities(&self, text: &str) -> Result<Vec<ExtractedEntity>>;

    /// A deduplicated version of `items` plus the model's self-reported confidence.
    async fn deduplicate(&self, items: &[String]) -> Result<DeduplicationResult>;
}

/// Classification backed by a chat completions endpoint.
pub struct LlmClassifier {
    client: ChatClient,
    json_attempts: usize,
    max_input_chars: usize,
}

impl LlmClassifier {
    pub fn new(client: ChatClient) -> Self {
        Self {
            client,
            json_attempts: 3,
            max_input_chars: 12_000,
        }
    }

    /// Longer documents are cut before prompting.
    pub fn with_max_input_chars(mut self, max_input_chars: usize) -> Self {
        self.max_input_chars = max_input_chars;
        self
    }
}

#[async_trait]
impl ClassificationService for LlmClassifier {
    async fn extract_entities(&self, text: &str) -> Result<Vec<ExtractedEntity>> {
        let text: String = text.chars().take(self.max_input_chars).collect();
        let request = prompt::build_extraction_prompt(&text);

        let json_str = self
            .client
            .generate_json(&request, prompt::ENTITY_SCHEMA, self.json_attempts)
            .await
            .context("Failed to extract entities")?;

        let result: ExtractionResult =
            serde_json::from_str(&json_str).context("Failed to parse extraction result")?;

        let entities: Vec<ExtractedEntity> = result
            .entities
            .into_iter()
            .filter_map(|e| {
                let name = e.name.trim();
                (!name.is_empty()).then(|| ExtractedEntity::new(name, e.semantic_type.trim()))
            })
            .collect();

        debug!(entities = entities.len(), "Extracted entities");
        Ok(entities)
    }

    async fn deduplicate(&self, items: &[String]) -> Result<DeduplicationResult> {
        let request = prompt::build_dedup_prompt(items);

        let json_str = self
            .client
            .generate_json(&request, prompt::DEDUP_SCHEMA, self.json_attempts)
            .await
            .context("Failed to deduplicate entities")?;

        serde_json::from_str(&json_str).context("Failed to parse deduplication result")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::LlmConfig;
    use wiremock::matchers::{body_string_contains, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn classifier_replying(content: &str) -> (LlmClassifier, MockServer) {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{"message": {"content": content}}]
            })))
            .mount(&server)
            .await;

        let client = ChatClient::new(&LlmConfig {
            api_base: server.uri(),
            api_key: "k".to_string(),
            model: "m".to_string(),
            request_timeout_secs: 5,
        })
        .unwrap();
        (LlmClassifier::new(client), server)
    }

    #[tokio::test]
    async fn test_extract_entities_trims_and_drops_blank_names() {
        let (classifier, _server) = classifier_replying(
            r#"```json
{"entities": [{"entity": " Tramadol ", "type": "Drug"}, {"entity": "  ", "type": "Drug"}, {"entity": "Chronic pain", "type": "Disease"}]}
```"#,
        )
        .await;

        let entities = classifier.extract_entities("text").await.unwrap();

        assert_eq!(
            entities,
            vec![
                ExtractedEntity::new("Tramadol", "Drug"),
                ExtractedEntity::new("Chronic pain", "Disease"),
            ]
        );
    }

    #[tokio::test]
    async fn test_deduplicate_parses_confidence() {
        let (classifier, _server) =
            classifier_replying(r#"{"deduplicated": ["NASA"], "confidence": 0.97}"#).await;

        let result = classifier
            .deduplicate(&["NASA".to_string(), "nasa".to_string()])
            .await
            .unwrap();

        assert_eq!(result, DeduplicationResult::new(vec!["NASA".to_string()], Some(0.97)));
    }

    #[tokio::test]
    async fn test_malformed_payload_is_an_error() {
        let (classifier, _server) = classifier_replying(r#"{"entities": "none"}"#).await;

        assert!(classifier.extract_entities("text").await.is_err());
    }

    #[tokio::test]
    async fn test_long_input_is_truncated_before_prompting() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_string_contains("héllo"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{"message": {"content": "{\"entities\": []}"}}]
            })))
            .mount(&server)
            .await;

        let client = ChatClient::new(&LlmConfig {
            api_base: server.uri(),
            api_key: "k".to_string(),
            model: "m".to_string(),
            request_timeout_secs: 5,
        })
        .unwrap();
        let classifier = LlmClassifier::new(client).with_max_input_chars(4);

        assert!(classifier.extract_entities("héllo wörld").await.unwrap().is_empty());

        let requests = server.received_requests().await.unwrap();
        let body = String::from_utf8(requests[0].body.clone()).unwrap();
        assert!(body.contains("héll"));
        assert!(!body.contains("héllo"));
    }
}
