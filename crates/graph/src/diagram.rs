use extract::EntitySet;
use tracing::debug;

use crate::Triple;

pub const MAX_LABEL_CHARS: usize = 40;
const MAX_REASON_CHARS: usize = 200;

fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

/// Mermaid node identifier: spaces and hyphens become underscores, then the
/// result is cut to `MAX_LABEL_CHARS`.
pub fn node_id(name: &str) -> String {
    truncate(&name.replace([' ', '-'], "_"), MAX_LABEL_CHARS)
}

/// Triples whose subject and object both appear in `reference`, ignoring case.
pub fn filter_triples<'a>(triples: &'a [Triple], reference: &[String]) -> Vec<&'a Triple> {
    let known = EntitySet::new(reference);
    triples
        .iter()
        .filter(|t| {
            let keep = known.contains(&t.subject) && known.contains(&t.object);
            if !keep {
                debug!(subject = %t.subject, object = %t.object, "Dropping triple with unknown entity");
            }
            keep
        })
        .collect()
}

pub fn render_mermaid(triples: &[Triple], reference: &[String]) -> String {
    let mut lines = vec!["graph TD".to_string()];
    for triple in filter_triples(triples, reference) {
        lines.push(format!(
            "  {} -- {} --> {}",
            node_id(&triple.subject),
            truncate(&triple.predicate, MAX_LABEL_CHARS),
            node_id(&triple.object)
        ));
    }
    lines.join("\n")
}

fn quoted(text: &str) -> String {
    text.replace('"', "#quot;").replace(['\n', '\r'], " ")
}

/// Diagram written in place of a relation graph when a URL could not be processed.
pub fn render_failure(url: &str, reason: &str) -> String {
    [
        "graph TD".to_string(),
        "  failed[\"Processing failed\"]".to_string(),
        format!("  failed --> source[\"{}\"]", quoted(url)),
        format!("  failed --> reason[\"{}\"]", quoted(&truncate(reason, MAX_REASON_CHARS))),
    ]
    .join("\n")
}
