//! Placeholder relation generator.
//!
//! Chains neighbouring entities of the deduplicated list into triples. The
//! relations carry no meaning extracted from the document; they exist so the
//! diagram has edges to draw.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::Triple;

pub const RELATED_TO: &str = "related_to";

pub const PREDICATE_SYNONYMS: &[&str] = &[
    "related_to",
    "associated_with",
    "linked_to",
    "connected_to",
    "involves",
    "influences",
];

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum PredicateMode {
    /// Every triple uses `related_to`.
    #[default]
    Constant,
    /// Each triple draws a predicate from `PREDICATE_SYNONYMS`.
    RandomSynonym,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesisConfig {
    pub predicate: PredicateMode,
    pub max_triples: usize,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            predicate: PredicateMode::Constant,
            max_triples: 5,
        }
    }
}

pub struct RelationSynthesizer {
    mode: PredicateMode,
    max_triples: usize,
}

impl RelationSynthesizer {
    pub fn new(config: &SynthesisConfig) -> Self {
        Self {
            mode: config.predicate,
            max_triples: config.max_triples,
        }
    }

    /// Pairs `entities[i]` with `entities[i + 1]`, producing at most
    /// `min(len - 1, max_triples)` triples.
    pub fn synthesize<R: Rng + ?Sized>(&self, entities: &[String], rng: &mut R) -> Vec<Triple> {
        entities
            .windows(2)
            .take(self.max_triples)
            .map(|pair| Triple::new(pair[0].clone(), self.predicate(rng), pair[1].clone()))
            .collect()
    }

    fn predicate<R: Rng + ?Sized>(&self, rng: &mut R) -> &'static str {
        match self.mode {
            PredicateMode::Constant => RELATED_TO,
            PredicateMode::RandomSynonym => PREDICATE_SYNONYMS.choose(rng).copied().unwrap_or(RELATED_TO),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn entities(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("E{i}")).collect()
    }

    fn synthesizer(predicate: PredicateMode) -> RelationSynthesizer {
        RelationSynthesizer::new(&SynthesisConfig {
            predicate,
            ..SynthesisConfig::default()
        })
    }

    #[test]
    fn test_fewer_than_two_entities_yield_nothing() {
        let mut rng = StdRng::seed_from_u64(7);
        let synth = synthesizer(PredicateMode::Constant);

        assert!(synth.synthesize(&[], &mut rng).is_empty());
        assert!(synth.synthesize(&entities(1), &mut rng).is_empty());
    }

    #[test]
    fn test_chain_is_capped() {
        let mut rng = StdRng::seed_from_u64(7);
        let synth = synthesizer(PredicateMode::Constant);

        let triples = synth.synthesize(&entities(7), &mut rng);

        assert_eq!(triples.len(), 5);
        assert_eq!(triples[0], Triple::new("E0", RELATED_TO, "E1"));
        assert_eq!(triples[4], Triple::new("E4", RELATED_TO, "E5"));
    }

    #[test]
    fn test_short_chain_uses_every_pair() {
        let mut rng = StdRng::seed_from_u64(7);

        let triples = synthesizer(PredicateMode::Constant).synthesize(&entities(3), &mut rng);

        assert_eq!(
            triples,
            vec![Triple::new("E0", RELATED_TO, "E1"), Triple::new("E1", RELATED_TO, "E2")]
        );
    }

    #[test]
    fn test_random_predicates_come_from_synonyms_and_are_seeded() {
        let synth = synthesizer(PredicateMode::RandomSynonym);

        let first = synth.synthesize(&entities(6), &mut StdRng::seed_from_u64(42));
        let second = synth.synthesize(&entities(6), &mut StdRng::seed_from_u64(42));

        assert_eq!(first, second);
        assert!(first.iter().all(|t| PREDICATE_SYNONYMS.contains(&t.predicate.as_str())));
    }
}
