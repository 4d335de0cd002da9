//! A container holding an error or a value.

use std::fmt;

use crate::Error;

/// A container holding an error or a value.
///
/// Exactly one of the two is live. Once the value has been moved out with
/// [`Expected::release`] the container holds neither, and any further
/// value access is a contract violation.
///
/// `Expected` is deliberately not `Clone`: neither payloads nor errors are
/// assumed to be cheap to copy.
#[must_use]
pub struct Expected<T> {
    state: State<T>,
}

enum State<T> {
    Value(T),
    Error(Error),
    Released,
}

impl<T> Expected<T> {
    /// Create a container holding a value.
    #[inline]
    pub fn new(value: T) -> Self {
        Expected {
            state: State::Value(value),
        }
    }

    /// Return true if a value is held.
    #[inline]
    pub fn has_value(&self) -> bool {
        matches!(self.state, State::Value(_))
    }

    /// Return true if an error is held.
    #[inline]
    pub fn has_error(&self) -> bool {
        matches!(self.state, State::Error(_))
    }

    /// Return the value.
    ///
    /// # Panics
    ///
    /// Unwinds with the stored error when an error is held, and panics if
    /// the value was already released.
    #[track_caller]
    pub fn value(&self) -> &T {
        match &self.state {
            State::Value(value) => value,
            State::Error(err) => err.clone().throw(),
            State::Released => released(),
        }
    }

    /// Return the value mutably. Panics like [`Expected::value`].
    #[track_caller]
    pub fn value_mut(&mut self) -> &mut T {
        match &mut self.state {
            State::Value(value) => value,
            State::Error(err) => err.clone().throw(),
            State::Released => released(),
        }
    }

    /// Consume the container, returning the value. Panics like
    /// [`Expected::value`].
    #[track_caller]
    pub fn into_value(self) -> T {
        match self.state {
            State::Value(value) => value,
            State::Error(err) => err.throw(),
            State::Released => released(),
        }
    }

    /// Move the value out, leaving the container empty.
    ///
    /// An error stays in place and is raised.
    #[track_caller]
    pub fn release(&mut self) -> T {
        match std::mem::replace(&mut self.state, State::Released) {
            State::Value(value) => value,
            State::Error(err) => {
                self.state = State::Error(err.clone());
                err.throw()
            }
            State::Released => released(),
        }
    }

    /// Return the value if one is held.
    #[inline]
    pub fn get(&self) -> Option<&T> {
        match &self.state {
            State::Value(value) => Some(value),
            State::Error(_) | State::Released => None,
        }
    }

    /// Return the error, or success if no error is held.
    pub fn error(&self) -> Error {
        match &self.state {
            State::Error(err) => err.clone(),
            State::Value(_) | State::Released => Error::success(),
        }
    }

    /// Consume the container, returning the error or success.
    pub fn into_error(self) -> Error {
        match self.state {
            State::Error(err) => err,
            State::Value(_) | State::Released => Error::success(),
        }
    }

    /// Convert into a `Result`.
    ///
    /// # Panics
    ///
    /// Panics if the value was already released.
    #[track_caller]
    pub fn into_result(self) -> Result<T, Error> {
        match self.state {
            State::Value(value) => Ok(value),
            State::Error(err) => Err(err),
            State::Released => released(),
        }
    }

    /// Transform the held value, keeping an error as is.
    #[track_caller]
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Expected<U> {
        match self.state {
            State::Value(value) => Expected::new(f(value)),
            State::Error(err) => Expected::from(err),
            State::Released => released(),
        }
    }
}

#[cold]
#[track_caller]
fn released() -> ! {
    panic!("Expected value accessed after release")
}

impl<T> From<Error> for Expected<T> {
    /// Create a container holding an error.
    ///
    /// # Panics
    ///
    /// Panics if `err` indicates success.
    #[track_caller]
    fn from(err: Error) -> Self {
        assert!(err.failed(), "Expected constructed from a successful Error");
        Expected {
            state: State::Error(err),
        }
    }
}

impl<T> From<Result<T, Error>> for Expected<T> {
    #[track_caller]
    fn from(result: Result<T, Error>) -> Self {
        match result {
            Ok(value) => Expected::new(value),
            Err(err) => Expected::from(err),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Expected<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.state {
            State::Value(value) => f.debug_tuple("Value").field(value).finish(),
            State::Error(err) => f.debug_tuple("Error").field(err).finish(),
            State::Released => f.write_str("Released"),
        }
    }
}
