//! The corpus: every extracted symbol of one documentation run.
//!
//! A [`Corpus`] is built once through [`CorpusBuilder`] and is immutable
//! afterwards. Building validates the tree shape, so traversal can rely on
//! every member id resolving and every symbol being owned by exactly one
//! container.

use rustc_hash::{FxHashMap, FxHashSet};

use refdoc_support::{format_error, Error};

use crate::visit::Visitor;
use crate::{Symbol, SymbolId, SymbolKind};

/// The complete, validated tree of symbol records.
pub struct Corpus {
    symbols: FxHashMap<SymbolId, Symbol>,
}

impl Corpus {
    /// Start building a corpus containing only the global namespace.
    pub fn builder() -> CorpusBuilder {
        CorpusBuilder::new()
    }

    /// Return the global namespace.
    pub fn global_namespace(&self) -> &Symbol {
        // Present by construction.
        &self.symbols[&SymbolId::GLOBAL]
    }

    /// Return the symbol with the given id.
    #[inline]
    pub fn get(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.get(&id)
    }

    /// Return the number of symbols, including the global namespace.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Return true if the global namespace has no members.
    pub fn is_empty(&self) -> bool {
        self.global_namespace().members.is_empty()
    }

    /// Iterate over all symbols in no particular order.
    pub fn symbols(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.values()
    }

    /// Iterate over the members of `symbol` in declaration order.
    pub fn members<'c>(&'c self, symbol: &'c Symbol) -> impl Iterator<Item = &'c Symbol> + 'c {
        symbol.members.iter().filter_map(|id| self.get(*id))
    }

    /// Return the `::`-separated name of a symbol.
    ///
    /// The global namespace has an empty qualified name; anonymous scopes
    /// appear as `(anonymous)`.
    pub fn qualified_name(&self, id: SymbolId) -> String {
        let mut parts = Vec::new();
        let mut current = self.get(id);
        while let Some(symbol) = current {
            if symbol.id.is_global() {
                break;
            }
            parts.push(if symbol.name.is_empty() {
                "(anonymous)"
            } else {
                symbol.name.as_str()
            });
            current = symbol.parent.and_then(|parent| self.get(parent));
        }
        parts.reverse();
        parts.join("::")
    }

    /// Walk the whole tree, starting with the global namespace.
    pub fn traverse<'c, V>(&'c self, visitor: &mut V) -> Result<(), Error>
    where
        V: Visitor<'c> + ?Sized,
    {
        visitor.visit_symbol(self, self.global_namespace())
    }

    /// Return every symbol in traversal order.
    pub fn preorder(&self) -> Vec<&Symbol> {
        struct Collect<'c>(Vec<&'c Symbol>);

        impl<'c> Visitor<'c> for Collect<'c> {
            fn visit_symbol(&mut self, corpus: &'c Corpus, symbol: &'c Symbol) -> Result<(), Error> {
                self.0.push(symbol);
                crate::visit::walk_symbol(self, corpus, symbol)
            }
        }

        let mut collect = Collect(Vec::with_capacity(self.len()));
        // Member ids resolve by construction, so the walk cannot fail.
        let _ = self.traverse(&mut collect);
        collect.0
    }
}

/// Accumulates symbols and validates them into a [`Corpus`].
pub struct CorpusBuilder {
    symbols: FxHashMap<SymbolId, Symbol>,
    next_id: u64,
}

impl CorpusBuilder {
    /// Create a builder holding only the global namespace.
    pub fn new() -> Self {
        let mut symbols = FxHashMap::default();
        symbols.insert(SymbolId::GLOBAL, Symbol::global_namespace());
        CorpusBuilder {
            symbols,
            next_id: 1,
        }
    }

    /// Insert a fully formed symbol, as produced by an extraction frontend.
    ///
    /// The symbol's parent and member links are taken as given and checked
    /// by [`CorpusBuilder::build`].
    pub fn insert(&mut self, symbol: Symbol) -> Result<(), Error> {
        if self.symbols.contains_key(&symbol.id) {
            return Err(format_error!("duplicate symbol {}", symbol.id));
        }
        self.symbols.insert(symbol.id, symbol);
        Ok(())
    }

    /// Add a new symbol as the last member of `parent`, returning its id.
    pub fn add(
        &mut self,
        parent: SymbolId,
        kind: SymbolKind,
        name: impl Into<String>,
    ) -> Result<SymbolId, Error> {
        match self.symbols.get(&parent) {
            None => return Err(format_error!("parent symbol {parent} does not exist")),
            Some(owner) if !owner.is_container() => {
                return Err(format_error!(
                    "{} symbol {parent} cannot own members",
                    owner.kind
                ));
            }
            Some(_) => {}
        }
        let id = self.allocate_id();
        self.symbols
            .insert(id, Symbol::new(id, kind, name).with_parent(parent));
        if let Some(owner) = self.symbols.get_mut(&parent) {
            owner.members.push(id);
        }
        Ok(id)
    }

    /// Return a symbol for further editing.
    pub fn symbol_mut(&mut self, id: SymbolId) -> Option<&mut Symbol> {
        self.symbols.get_mut(&id)
    }

    fn allocate_id(&mut self) -> SymbolId {
        loop {
            let id = SymbolId::new(self.next_id);
            self.next_id += 1;
            if !self.symbols.contains_key(&id) {
                return id;
            }
        }
    }

    /// Validate the tree and produce the corpus.
    ///
    /// Every structural defect is reported, aggregated into one error.
    pub fn build(self) -> Result<Corpus, Error> {
        let errors = validate(&self.symbols);
        Error::from(errors).into_result()?;
        tracing::debug!(symbols = self.symbols.len(), "corpus built");
        Ok(Corpus {
            symbols: self.symbols,
        })
    }
}

impl Default for CorpusBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn validate(symbols: &FxHashMap<SymbolId, Symbol>) -> Vec<Error> {
    let mut errors = Vec::new();

    match symbols.get(&SymbolId::GLOBAL) {
        None => errors.push(Error::new("the global namespace is missing")),
        Some(root) => {
            if root.kind != SymbolKind::Namespace {
                errors.push(format_error!(
                    "the global namespace has kind {}",
                    root.kind
                ));
            }
            if let Some(parent) = root.parent {
                errors.push(format_error!(
                    "the global namespace names parent {parent}"
                ));
            }
        }
    }

    // Sorted so that messages come out in a stable order.
    let mut ids: Vec<SymbolId> = symbols.keys().copied().collect();
    ids.sort_unstable();

    let mut owners: FxHashMap<SymbolId, SymbolId> = FxHashMap::default();
    for id in &ids {
        let symbol = &symbols[id];
        if symbol.id != *id {
            errors.push(format_error!("symbol {id} is stored with id {}", symbol.id));
        }
        if !symbol.is_container() && !symbol.members.is_empty() {
            errors.push(format_error!(
                "{} symbol {id} cannot own members",
                symbol.kind
            ));
        }
        for member_id in &symbol.members {
            if member_id.is_global() {
                errors.push(format_error!(
                    "the global namespace is listed as a member of {id}"
                ));
                continue;
            }
            let Some(member) = symbols.get(member_id) else {
                errors.push(format_error!("symbol {id} lists missing member {member_id}"));
                continue;
            };
            if let Some(previous) = owners.insert(*member_id, *id) {
                errors.push(format_error!(
                    "symbol {member_id} is a member of both {previous} and {id}"
                ));
            }
            if member.parent != Some(*id) {
                errors.push(format_error!(
                    "symbol {member_id} is a member of {id} but names parent {}",
                    member
                        .parent
                        .map_or_else(|| "none".to_owned(), |p| p.to_string())
                ));
            }
        }
    }

    // Anything not reached from the root is orphaned or part of a cycle.
    let mut reached: FxHashSet<SymbolId> = FxHashSet::default();
    let mut stack = vec![SymbolId::GLOBAL];
    while let Some(id) = stack.pop() {
        if !reached.insert(id) {
            continue;
        }
        if let Some(symbol) = symbols.get(&id) {
            stack.extend(symbol.members.iter().copied());
        }
    }
    for id in &ids {
        if !reached.contains(id) {
            errors.push(format_error!(
                "symbol {id} is not reachable from the global namespace"
            ));
        }
    }

    errors
}
