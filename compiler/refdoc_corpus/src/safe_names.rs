//! Collision-free persisted names for symbols.
//!
//! Every symbol receives a name made only of `[A-Za-z0-9_-]` that is unique
//! across the corpus even after case folding. Names are assigned in one
//! pre-order pass so that the result depends only on the corpus.
//!
//! A name is the parent's safe name and the symbol's sanitised leaf joined
//! by `-`. Members of the global namespace use the bare leaf and the global
//! namespace itself is `global`. Since leaves never contain `-`, a colliding
//! candidate gets a `-2`, `-3`, ... suffix that no symbol name can forge.

use rustc_hash::{FxHashMap, FxHashSet};

use refdoc_support::Error;

use crate::visit::{walk_symbol, Visitor};
use crate::{Corpus, Symbol, SymbolId};

/// Name of the global namespace.
pub const GLOBAL_NAME: &str = "global";

/// Upper bound on the length of a candidate, before any suffix.
const MAX_NAME_LEN: usize = 200;

/// The safe name of every symbol in a corpus.
#[derive(Clone, Debug, Default)]
pub struct SafeNames {
    names: FxHashMap<SymbolId, String>,
}

impl SafeNames {
    /// Assign a name to every symbol reachable from the global namespace.
    #[tracing::instrument(level = "debug", skip_all, fields(symbols = corpus.len()))]
    pub fn new(corpus: &Corpus) -> Result<Self, Error> {
        let mut assigner = Assigner {
            names: FxHashMap::default(),
            taken: FxHashSet::default(),
        };
        assigner.names.reserve(corpus.len());
        corpus.traverse(&mut assigner)?;
        Ok(SafeNames {
            names: assigner.names,
        })
    }

    /// Return the name of `id`, if it is part of the corpus.
    #[inline]
    pub fn get(&self, id: SymbolId) -> Option<&str> {
        self.names.get(&id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SymbolId, &str)> {
        self.names.iter().map(|(id, name)| (*id, name.as_str()))
    }
}

struct Assigner {
    names: FxHashMap<SymbolId, String>,
    /// Lowercased names already handed out.
    taken: FxHashSet<String>,
}

impl Assigner {
    fn candidate(&self, symbol: &Symbol) -> String {
        if symbol.id.is_global() {
            return GLOBAL_NAME.to_owned();
        }
        let leaf = sanitize_leaf(symbol);
        let mut candidate = match symbol.parent {
            Some(parent) if !parent.is_global() => match self.names.get(&parent) {
                Some(prefix) => format!("{prefix}-{leaf}"),
                None => leaf,
            },
            _ => leaf,
        };
        // Candidates are ASCII, so any byte offset is a char boundary.
        candidate.truncate(MAX_NAME_LEN);
        candidate
    }

    fn claim(&mut self, candidate: String) -> String {
        if self.taken.insert(candidate.to_ascii_lowercase()) {
            return candidate;
        }
        let mut n = 2_u32;
        loop {
            let suffixed = format!("{candidate}-{n}");
            if self.taken.insert(suffixed.to_ascii_lowercase()) {
                return suffixed;
            }
            n += 1;
        }
    }
}

impl<'c> Visitor<'c> for Assigner {
    fn visit_symbol(&mut self, corpus: &'c Corpus, symbol: &'c Symbol) -> Result<(), Error> {
        let candidate = self.candidate(symbol);
        let name = self.claim(candidate);
        self.names.insert(symbol.id, name);
        walk_symbol(self, corpus, symbol)
    }
}

/// Replace every character outside `[A-Za-z0-9_]` with `_`.
///
/// Unnamed symbols become `anon_<kind>`. Device names reserved by Windows
/// get a trailing `_`.
fn sanitize_leaf(symbol: &Symbol) -> String {
    if symbol.name.is_empty() {
        return format!("anon_{}", symbol.kind);
    }
    let mut leaf: String = symbol
        .name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if is_reserved_device_name(&leaf) {
        leaf.push('_');
    }
    leaf
}

fn is_reserved_device_name(leaf: &str) -> bool {
    let upper = leaf.to_ascii_uppercase();
    match upper.as_bytes() {
        b"CON" | b"PRN" | b"AUX" | b"NUL" => true,
        [b'C', b'O', b'M', digit] | [b'L', b'P', b'T', digit] => digit.is_ascii_digit(),
        _ => false,
    }
}
