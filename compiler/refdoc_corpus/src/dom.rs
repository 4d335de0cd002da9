//! Dom view of corpus symbols, for renderers.
//!
//! Properties are computed on access from the shared corpus. Members and
//! the parent are themselves lazy objects, so only the parts a renderer
//! touches are ever materialised.

use std::sync::Arc;

use refdoc_dom::{Array, LazyArray, LazyObject, Object, Value};
use refdoc_support::{format_error, Expected};

use crate::{Corpus, SymbolId};

const SYMBOL_KEYS: [&str; 9] = [
    "id",
    "kind",
    "name",
    "qualifiedName",
    "doc",
    "location",
    "isContainer",
    "members",
    "parent",
];

/// Return a lazy object describing symbol `id`, or null if it is unknown.
pub fn symbol_to_dom(corpus: &Arc<Corpus>, id: SymbolId) -> Value {
    if corpus.get(id).is_none() {
        return Value::Null;
    }
    let corpus = Arc::clone(corpus);
    let keys = SYMBOL_KEYS.iter().map(|k| (*k).to_owned()).collect();
    Value::from(Object::new(LazyObject::new(keys, move |key: &str| {
        symbol_property(&corpus, id, key)
    })))
}

fn symbol_property(corpus: &Arc<Corpus>, id: SymbolId, key: &str) -> Expected<Value> {
    let Some(symbol) = corpus.get(id) else {
        return Expected::from(format_error!("symbol {id} is not in the corpus"));
    };
    let value = match key {
        "id" => Value::from(id.to_string()),
        "kind" => Value::from(symbol.kind.as_str()),
        "name" => Value::from(symbol.name.as_str()),
        "qualifiedName" => Value::from(corpus.qualified_name(id)),
        "doc" => Value::from(symbol.doc.as_deref()),
        "location" => match &symbol.location {
            Some(location) => Value::from(
                Object::builder()
                    .set("file", location.file.as_str())
                    .set("line", location.line)
                    .build(),
            ),
            None => Value::Null,
        },
        "isContainer" => Value::from(symbol.is_container()),
        "members" => {
            let members = symbol.members.clone();
            let corpus = Arc::clone(corpus);
            Value::from(Array::new(LazyArray::new(
                members.len(),
                move |index: usize| match members.get(index) {
                    Some(member) => Expected::new(symbol_to_dom(&corpus, *member)),
                    None => Expected::from(format_error!("member {index} does not exist")),
                },
            )))
        }
        "parent" => match symbol.parent {
            Some(parent) => symbol_to_dom(corpus, parent),
            None => Value::Null,
        },
        _ => Value::Null,
    };
    Expected::new(value)
}
