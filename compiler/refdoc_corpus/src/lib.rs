//! The symbol corpus consumed by refdoc generators.
//!
//! - [`Corpus`]: the validated tree of [`Symbol`] records
//! - [`Visitor`]: depth-first traversal starting at the global namespace
//! - [`SafeNames`]: collision-free artifact names per symbol
//! - [`Config`]: options shared by every generator
//! - [`symbol_to_dom`]: a lazy Dom view of a symbol

mod config;
mod corpus;
mod dom;
mod safe_names;
mod symbol;
pub mod visit;

pub use config::Config;
pub use corpus::{Corpus, CorpusBuilder};
pub use dom::symbol_to_dom;
pub use safe_names::{SafeNames, GLOBAL_NAME};
pub use symbol::{DeclLocation, Symbol, SymbolId, SymbolKind};
pub use visit::{walk_symbol, Visitor};
