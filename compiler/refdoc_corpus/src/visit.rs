//! Depth-first traversal of a corpus.
//!
//! Implementors override [`Visitor::visit_symbol`] and call [`walk_symbol`]
//! to continue into members. Returning an error stops the walk.

use refdoc_support::Error;

use crate::{Corpus, Symbol};

/// Visitor over the symbol tree.
///
/// The lifetime `'c` is that of the corpus, so visitors may keep references
/// to symbols past the call.
pub trait Visitor<'c> {
    fn visit_symbol(&mut self, corpus: &'c Corpus, symbol: &'c Symbol) -> Result<(), Error> {
        walk_symbol(self, corpus, symbol)
    }
}

/// Visit every member of a container, in declaration order.
pub fn walk_symbol<'c, V: Visitor<'c> + ?Sized>(
    visitor: &mut V,
    corpus: &'c Corpus,
    symbol: &'c Symbol,
) -> Result<(), Error> {
    if !symbol.is_container() {
        return Ok(());
    }
    for id in &symbol.members {
        let Some(member) = corpus.get(*id) else {
            return Err(format_missing(symbol, *id));
        };
        visitor.visit_symbol(corpus, member)?;
    }
    Ok(())
}

#[cold]
fn format_missing(symbol: &Symbol, member: crate::SymbolId) -> Error {
    refdoc_support::format_error!("symbol {} lists missing member {member}", symbol.id)
}
