//! Property-based tests for safe name assignment.
//!
//! Random symbol trees with deliberately colliding names check that every
//! symbol gets exactly one name, that no two names collide after case
//! folding, and that names only use file-name safe characters.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use proptest::prelude::*;
use refdoc_corpus::{Corpus, SafeNames, SymbolId, SymbolKind};
use rustc_hash::FxHashSet;

/// A small alphabet so that siblings and cousins collide often.
fn name_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[aAbB_.<>-]{0,3}").expect("valid regex")
}

fn kind_strategy() -> impl Strategy<Value = SymbolKind> {
    prop_oneof![
        Just(SymbolKind::Namespace),
        Just(SymbolKind::Record),
        Just(SymbolKind::Enum),
        Just(SymbolKind::Function),
        Just(SymbolKind::Variable),
        Just(SymbolKind::Field),
    ]
}

/// Each entry picks a parent among the containers created so far.
fn tree_strategy() -> impl Strategy<Value = Vec<(usize, SymbolKind, String)>> {
    prop::collection::vec((any::<usize>(), kind_strategy(), name_strategy()), 0..60)
}

fn build_corpus(entries: &[(usize, SymbolKind, String)]) -> Corpus {
    let mut builder = Corpus::builder();
    let mut containers = vec![SymbolId::GLOBAL];
    for (pick, kind, name) in entries {
        let parent = containers[pick % containers.len()];
        let id = builder.add(parent, *kind, name.as_str()).unwrap();
        if kind.is_container() {
            containers.push(id);
        }
    }
    builder.build().unwrap()
}

proptest! {
    #[test]
    fn safe_names_are_pairwise_distinct(entries in tree_strategy()) {
        let corpus = build_corpus(&entries);
        let names = SafeNames::new(&corpus).unwrap();

        prop_assert_eq!(names.len(), corpus.len());
        let mut folded = FxHashSet::default();
        for (_, name) in names.iter() {
            prop_assert!(folded.insert(name.to_ascii_lowercase()), "duplicate name {}", name);
        }
    }

    #[test]
    fn safe_names_use_safe_characters(entries in tree_strategy()) {
        let corpus = build_corpus(&entries);
        let names = SafeNames::new(&corpus).unwrap();

        for symbol in corpus.symbols() {
            let name = names.get(symbol.id).unwrap();
            prop_assert!(!name.is_empty());
            prop_assert!(
                name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-'),
                "unsafe name {}",
                name
            );
        }
    }
}
