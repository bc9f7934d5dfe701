const MAX_REPAIR_ECHO_CHARS: usize = 4000;

/// JSON shape of an entity extraction answer.
pub const ENTITY_SCHEMA: &str = r#"{"entities": [{"entity": "EntityName", "type": "SemanticType"}]}"#;

/// JSON shape of a deduplication answer.
pub const DEDUP_SCHEMA: &str = r#"{"deduplicated": ["Name", "..."], "confidence": 0.0}"#;

pub fn build_extraction_prompt(paragraph: &str) -> String {
    format!(
        r#"Identify the named entities in the following text.

INSTRUCTIONS:
1. List every named entity: people, organizations, places, drugs, diseases, processes, concepts, technologies
2. Give each entity a short semantic type (e.g. Drug, Disease, Process, Concept, Organization, Location)
3. Copy entity names exactly as they appear in the text
4. Output ONLY valid JSON, nothing else

SCHEMA:
{}

TEXT:
{}

JSON OUTPUT:"#,
        ENTITY_SCHEMA, paragraph
    )
}

pub fn build_dedup_prompt(items: &[String]) -> String {
    let listed = serde_json::to_string(items).unwrap_or_else(|_| "[]".to_string());
    format!(
        r#"The following list of entity names may contain duplicates, including spelling variants, abbreviations and case differences.

INSTRUCTIONS:
1. Merge entries that refer to the same real-world entity
2. Keep one name per entity, copied exactly from the list
3. Report how confident you are in the result as a number between 0.0 and 1.0
4. Output ONLY valid JSON, nothing else

SCHEMA:
{}

ITEMS:
{}

JSON OUTPUT:"#,
        DEDUP_SCHEMA, listed
    )
}

/// Sends a non-JSON answer back with the shape it should have had. The echoed
/// answer is cut to `MAX_REPAIR_ECHO_CHARS`.
pub fn build_repair_prompt(answer: &str, schema: &str) -> String {
    let answer: String = answer.chars().take(MAX_REPAIR_ECHO_CHARS).collect();
    format!(
        r#"Your previous answer could not be parsed as JSON:

{}

Rewrite it as a single JSON object matching this schema, keeping the same content:
{}

Reply with the JSON object only."#,
        answer, schema
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedup_prompt_lists_items_as_json() {
        let prompt = build_dedup_prompt(&["Rye".to_string(), "rye \"grain\"".to_string()]);

        assert!(prompt.contains(r#"["Rye","rye \"grain\""]"#));
    }

    #[test]
    fn test_repair_prompt_names_expected_schema() {
        let prompt = build_repair_prompt("Sure! Here are the entities: Rye", DEDUP_SCHEMA);

        assert!(prompt.contains("Here are the entities: Rye"));
        assert!(prompt.contains(r#""deduplicated""#));
    }

    #[test]
    fn test_repair_prompt_cuts_long_answers() {
        let prompt = build_repair_prompt(&"x".repeat(10_000), ENTITY_SCHEMA);

        assert!(!prompt.contains(&"x".repeat(MAX_REPAIR_ECHO_CHARS + 1)));
        assert!(prompt.contains(ENTITY_SCHEMA));
    }

    #[test]
    fn test_extraction_prompt_embeds_text() {
        assert!(build_extraction_prompt("Aspirin treats pain.").contains("TEXT:\nAspirin treats pain."));
    }
}
