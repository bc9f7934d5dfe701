use std::collections::HashSet;

/// Comparison key for entity names: trimmed, lowercased, inner whitespace
/// collapsed to single spaces.
pub fn entity_key(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Case-insensitive membership set over entity names.
#[derive(Debug, Clone, Default)]
pub struct EntitySet {
    keys: HashSet<String>,
}

impl EntitySet {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            keys: names.into_iter().map(|n| entity_key(n.as_ref())).collect(),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.keys.contains(&entity_key(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalization() {
        assert_eq!(entity_key("GraphRAG"), "graphrag");
        assert_eq!(entity_key("  Sustainable   Agriculture \n"), "sustainable agriculture");
        assert_eq!(entity_key(""), "");
    }

    #[test]
    fn test_case_insensitive_membership() {
        let set = EntitySet::new(["COVID-19", " Tramadol "]);

        assert!(set.contains("covid-19"));
        assert!(set.contains("TRAMADOL"));
        assert!(!set.contains("Shingles"));
        assert!(set.contains("  covid-19 "));
    }
}
