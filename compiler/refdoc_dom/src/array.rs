//! Array capability and its backings.

use std::fmt;
use std::sync::Arc;

use refdoc_support::{format_error, Expected};

use crate::Value;

/// Interface for array implementations.
///
/// Implementations may compute elements on demand. Callers must not assume
/// that repeated access returns a cached result.
pub trait ArrayImpl: Send + Sync {
    /// Return the number of elements.
    fn length(&self) -> usize;

    /// Return the element at `index`.
    ///
    /// An index past the end, or a failure while computing the element,
    /// is reported as an error.
    fn get(&self, index: usize) -> Expected<Value>;
}

/// An array of values.
///
/// A cheap handle to a shared [`ArrayImpl`].
#[derive(Clone)]
pub struct Array {
    imp: Arc<dyn ArrayImpl>,
}

impl Array {
    /// Create an array from an implementation.
    pub fn new(imp: impl ArrayImpl + 'static) -> Self {
        Array { imp: Arc::new(imp) }
    }

    /// Create an array sharing an existing implementation.
    pub fn from_impl(imp: Arc<dyn ArrayImpl>) -> Self {
        Array { imp }
    }

    /// Return the implementation.
    pub fn implementation(&self) -> &Arc<dyn ArrayImpl> {
        &self.imp
    }

    #[inline]
    pub fn length(&self) -> usize {
        self.imp.length()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.length() == 0
    }

    #[inline]
    pub fn get(&self, index: usize) -> Expected<Value> {
        self.imp.get(index)
    }

    /// Iterate over the elements, computing each one as it is reached.
    pub fn iter(&self) -> impl Iterator<Item = Expected<Value>> + '_ {
        (0..self.length()).map(move |index| self.get(index))
    }

    /// Return true if both arrays share one implementation.
    pub fn same_impl(&self, other: &Array) -> bool {
        Arc::ptr_eq(&self.imp, &other.imp)
    }
}

impl Default for Array {
    fn default() -> Self {
        Array::from(Vec::new())
    }
}

impl From<Vec<Value>> for Array {
    fn from(elements: Vec<Value>) -> Self {
        Array::new(DefaultArrayImpl::new(elements))
    }
}

impl FromIterator<Value> for Array {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Array::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl fmt::Debug for Array {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Array")
            .field("length", &self.length())
            .finish()
    }
}

/// The default, in-memory array implementation.
#[derive(Clone, Debug, Default)]
pub struct DefaultArrayImpl {
    elements: Vec<Value>,
}

impl DefaultArrayImpl {
    pub fn new(elements: Vec<Value>) -> Self {
        DefaultArrayImpl { elements }
    }
}

impl ArrayImpl for DefaultArrayImpl {
    fn length(&self) -> usize {
        self.elements.len()
    }

    fn get(&self, index: usize) -> Expected<Value> {
        match self.elements.get(index) {
            Some(value) => Expected::new(value.clone()),
            None => out_of_range(index, self.elements.len()),
        }
    }
}

/// An array whose elements are computed on every access.
pub struct LazyArray<F> {
    length: usize,
    element: F,
}

impl<F> LazyArray<F>
where
    F: Fn(usize) -> Expected<Value> + Send + Sync,
{
    /// Create an array of `length` elements produced by `element`.
    pub fn new(length: usize, element: F) -> Self {
        LazyArray { length, element }
    }
}

impl<F> ArrayImpl for LazyArray<F>
where
    F: Fn(usize) -> Expected<Value> + Send + Sync,
{
    fn length(&self) -> usize {
        self.length
    }

    fn get(&self, index: usize) -> Expected<Value> {
        if index >= self.length {
            return out_of_range(index, self.length);
        }
        (self.element)(index)
    }
}

#[track_caller]
fn out_of_range(index: usize, length: usize) -> Expected<Value> {
    Expected::from(format_error!(
        "index {index} is out of range for an array of length {length}"
    ))
}
