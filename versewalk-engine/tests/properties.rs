//! Property tests for poem generation

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::HashSet;
use std::sync::Arc;
use versewalk_engine::*;

const CORPUS: &str = "\
the morning brings a golden light, and stars will fill the quiet night;
it was a lovely sight. we walk along the winding way
the children laugh and love to play until the end of the day";

fn assembler(length: LengthPolicy, policy: BoundaryPolicy) -> PoemAssembler {
    let table = StaticRhymeTable::new()
        .with("light", ["night", "sight"])
        .with("day", ["way", "play"])
        .symmetric();
    let config = EngineConfig {
        length,
        boundary_policy: policy,
        ..EngineConfig::offline()
    };
    PoemAssembler::new(config, Arc::new(table)).unwrap()
}

fn scheme_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["aabb", "abab", "abba", "aab", "ab/ba", "a/b/a/b"])
        .prop_map(String::from)
}

proptest! {
    #[test]
    fn prop_generated_poem_respects_plan(
        scheme in scheme_strategy(),
        seed in any::<u64>(),
        length in 1usize..12,
        restart in any::<bool>(),
    ) {
        let policy = if restart { BoundaryPolicy::Restart } else { BoundaryPolicy::Stop };
        let assembler = assembler(LengthPolicy::Fixed(length), policy);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let poem = assembler.generate(&scheme, CORPUS, &mut rng).unwrap();
        let labels: Vec<char> = scheme.chars().filter(|c| *c != '/').collect();
        prop_assert_eq!(poem.line_count(), labels.len());

        let endings: HashSet<&str> = poem.endings().into_iter().collect();
        prop_assert_eq!(endings.len(), labels.len());

        for (line, label) in poem.lines().zip(&labels) {
            prop_assert_eq!(line.label, *label);
            prop_assert!(line.token_count() <= length);
            prop_assert!(line.token_count() >= 1);
            prop_assert_eq!(line.tokens.last(), Some(&line.ending));
        }
    }

    #[test]
    fn prop_same_seed_is_idempotent(seed in any::<u64>(), min in 1usize..5, extra in 0usize..5) {
        let assembler = assembler(
            LengthPolicy::Range { min, max: min + extra },
            BoundaryPolicy::Stop,
        );
        let first = assembler
            .generate("abab", CORPUS, &mut ChaCha8Rng::seed_from_u64(seed))
            .unwrap();
        let second = assembler
            .generate("abab", CORPUS, &mut ChaCha8Rng::seed_from_u64(seed))
            .unwrap();
        prop_assert_eq!(first.to_string(), second.to_string());
    }
}
