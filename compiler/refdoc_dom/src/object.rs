//! Object capability and its backings.

use std::fmt;
use std::sync::Arc;

use refdoc_support::Expected;

use crate::Value;

/// Interface for object implementations.
///
/// Implementations may compute properties on demand; a failure while
/// computing one is reported through the returned [`Expected`].
pub trait ObjectImpl: Send + Sync {
    /// Return the value for `key`, or null if there is no such key.
    fn get(&self, key: &str) -> Expected<Value>;

    /// Return the keys, in enumeration order.
    fn keys(&self) -> Vec<String>;

    /// Return true if the object is known to be empty.
    ///
    /// Objects are assumed non-empty unless the implementation says
    /// otherwise.
    fn is_empty(&self) -> bool {
        false
    }

    /// Return true if `key` is present.
    fn exists(&self, key: &str) -> bool {
        self.keys().iter().any(|k| k == key)
    }
}

/// An object with string keys.
///
/// A cheap handle to a shared [`ObjectImpl`].
#[derive(Clone)]
pub struct Object {
    imp: Arc<dyn ObjectImpl>,
}

impl Object {
    /// Create an object from an implementation.
    pub fn new(imp: impl ObjectImpl + 'static) -> Self {
        Object { imp: Arc::new(imp) }
    }

    /// Create an object sharing an existing implementation.
    pub fn from_impl(imp: Arc<dyn ObjectImpl>) -> Self {
        Object { imp }
    }

    /// Start building an in-memory object.
    pub fn builder() -> ObjectBuilder {
        ObjectBuilder::default()
    }

    /// Return the implementation.
    pub fn implementation(&self) -> &Arc<dyn ObjectImpl> {
        &self.imp
    }

    #[inline]
    pub fn get(&self, key: &str) -> Expected<Value> {
        self.imp.get(key)
    }

    #[inline]
    pub fn keys(&self) -> Vec<String> {
        self.imp.keys()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.imp.is_empty()
    }

    #[inline]
    pub fn exists(&self, key: &str) -> bool {
        self.imp.exists(key)
    }

    /// Return true if both objects share one implementation.
    pub fn same_impl(&self, other: &Object) -> bool {
        Arc::ptr_eq(&self.imp, &other.imp)
    }
}

impl Default for Object {
    fn default() -> Self {
        Object::new(DefaultObjectImpl::default())
    }
}

impl From<Vec<(String, Value)>> for Object {
    fn from(entries: Vec<(String, Value)>) -> Self {
        entries
            .into_iter()
            .fold(Object::builder(), |b, (key, value)| b.set(key, value))
            .build()
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Object")
            .field("keys", &self.keys())
            .finish()
    }
}

/// The default, in-memory object implementation.
///
/// Keys keep their insertion order.
#[derive(Clone, Debug, Default)]
pub struct DefaultObjectImpl {
    entries: Vec<(String, Value)>,
}

impl DefaultObjectImpl {
    /// Set `key` to `value`. An existing key keeps its position.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl ObjectImpl for DefaultObjectImpl {
    fn get(&self, key: &str) -> Expected<Value> {
        let value = self
            .entries
            .iter()
            .find(|(k, _)| k == key)
            .map_or(Value::Null, |(_, v)| v.clone());
        Expected::new(value)
    }

    fn keys(&self) -> Vec<String> {
        self.entries.iter().map(|(k, _)| k.clone()).collect()
    }

    fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn exists(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }
}

/// Builder for an in-memory [`Object`].
#[derive(Default)]
pub struct ObjectBuilder {
    imp: DefaultObjectImpl,
}

impl ObjectBuilder {
    #[must_use]
    pub fn set(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.imp.set(key, value);
        self
    }

    pub fn build(self) -> Object {
        Object::new(self.imp)
    }
}

/// An object whose properties are computed on every access.
pub struct LazyObject<F> {
    keys: Vec<String>,
    property: F,
}

impl<F> LazyObject<F>
where
    F: Fn(&str) -> Expected<Value> + Send + Sync,
{
    /// Create an object with the given keys, whose values are produced
    /// by `property`. Lookups of other keys yield null without calling it.
    pub fn new(keys: Vec<String>, property: F) -> Self {
        LazyObject { keys, property }
    }
}

impl<F> ObjectImpl for LazyObject<F>
where
    F: Fn(&str) -> Expected<Value> + Send + Sync,
{
    fn get(&self, key: &str) -> Expected<Value> {
        if !self.exists(key) {
            return Expected::new(Value::Null);
        }
        (self.property)(key)
    }

    fn keys(&self) -> Vec<String> {
        self.keys.clone()
    }

    fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    fn exists(&self, key: &str) -> bool {
        self.keys.iter().any(|k| k == key)
    }
}
