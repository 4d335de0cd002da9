//! Symbol records.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identifier of a symbol.
///
/// The global namespace always has the all-zero id.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SymbolId(u64);

impl SymbolId {
    /// The id of the global namespace.
    pub const GLOBAL: SymbolId = SymbolId(0);

    #[inline]
    pub const fn new(raw: u64) -> Self {
        SymbolId(raw)
    }

    #[inline]
    pub const fn raw(self) -> u64 {
        self.0
    }

    #[inline]
    pub fn is_global(self) -> bool {
        self == Self::GLOBAL
    }
}

impl fmt::Display for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

impl fmt::Debug for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SymbolId({:016x})", self.0)
    }
}

/// The structural kind of a symbol.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SymbolKind {
    Namespace,
    Record,
    Enum,
    Function,
    Typedef,
    Variable,
    Field,
    Enumerator,
}

impl SymbolKind {
    /// Return true for kinds that own nested members.
    pub fn is_container(self) -> bool {
        matches!(
            self,
            SymbolKind::Namespace | SymbolKind::Record | SymbolKind::Enum
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SymbolKind::Namespace => "namespace",
            SymbolKind::Record => "record",
            SymbolKind::Enum => "enum",
            SymbolKind::Function => "function",
            SymbolKind::Typedef => "typedef",
            SymbolKind::Variable => "variable",
            SymbolKind::Field => "field",
            SymbolKind::Enumerator => "enumerator",
        }
    }
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a symbol was declared.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeclLocation {
    pub file: String,
    pub line: u32,
}

/// One documented entity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symbol {
    pub id: SymbolId,
    pub kind: SymbolKind,
    /// Unqualified name. Empty for anonymous entities.
    pub name: String,
    /// The owning container; `None` only for the global namespace.
    pub parent: Option<SymbolId>,
    /// Members in declaration order. Empty for leaf kinds.
    pub members: Vec<SymbolId>,
    /// Brief documentation text, if any was extracted.
    pub doc: Option<String>,
    pub location: Option<DeclLocation>,
}

impl Symbol {
    pub fn new(id: SymbolId, kind: SymbolKind, name: impl Into<String>) -> Self {
        Symbol {
            id,
            kind,
            name: name.into(),
            parent: None,
            members: Vec::new(),
            doc: None,
            location: None,
        }
    }

    /// Create the global namespace.
    pub fn global_namespace() -> Self {
        Symbol::new(SymbolId::GLOBAL, SymbolKind::Namespace, "")
    }

    #[inline]
    pub fn is_container(&self) -> bool {
        self.kind.is_container()
    }

    #[must_use]
    pub fn with_parent(mut self, parent: SymbolId) -> Self {
        self.parent = Some(parent);
        self
    }

    #[must_use]
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    #[must_use]
    pub fn with_location(mut self, file: impl Into<String>, line: u32) -> Self {
        self.location = Some(DeclLocation {
            file: file.into(),
            line,
        });
        self
    }
}
