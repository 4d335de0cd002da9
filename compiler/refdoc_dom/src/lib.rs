//! Dom - the dynamic value model used by renderers.
//!
//! A [`Value`] is a closed sum over null, booleans, integers, strings,
//! arrays and objects. Arrays and objects are capability interfaces
//! ([`ArrayImpl`], [`ObjectImpl`]) rather than concrete containers, so a
//! renderer can be handed in-memory data, lazily computed views over the
//! corpus, or anything else that answers the same questions.
//!
//! # Example
//!
//! ```text
//! let obj = Object::builder()
//!     .set("name", "Widget")
//!     .set("members", vec![Value::from(1), Value::from(2)])
//!     .build();
//! assert!(Value::from(obj).is_truthy());
//! ```

mod array;
mod object;
mod value;

pub use array::{Array, ArrayImpl, DefaultArrayImpl, LazyArray};
pub use object::{DefaultObjectImpl, LazyObject, Object, ObjectBuilder, ObjectImpl};
pub use value::{Kind, Value};
