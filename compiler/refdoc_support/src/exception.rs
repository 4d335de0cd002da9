//! Unwinding with an [`Error`].

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use crate::Error;

/// Panic payload carrying an [`Error`].
///
/// Raised by [`Error::throw`] and by checked accessors of
/// [`Expected`](crate::Expected). Recovered with [`Exception::catch`].
#[derive(Debug, thiserror::Error)]
#[error("{error}")]
pub struct Exception {
    error: Error,
}

impl Exception {
    /// Wrap an error. The error should indicate failure.
    pub fn new(error: Error) -> Self {
        Exception { error }
    }

    /// Return the error stored in the exception.
    pub fn error(&self) -> &Error {
        &self.error
    }

    /// Consume the exception, returning its error.
    pub fn into_error(self) -> Error {
        self.error
    }

    /// Run `f`, converting an unwind into an error value.
    ///
    /// An [`Exception`] payload yields its error. Any other panic yields an
    /// error carrying the panic text.
    pub fn catch<R>(f: impl FnOnce() -> R) -> Result<R, Error> {
        panic::catch_unwind(AssertUnwindSafe(f)).map_err(Self::from_panic)
    }

    /// Turn a caught panic payload into an error.
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Error {
        match payload.downcast::<Exception>() {
            Ok(exception) => exception.error,
            Err(payload) => {
                let text = payload
                    .downcast_ref::<&str>()
                    .map(|s| (*s).to_owned())
                    .or_else(|| payload.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic payload".to_owned());
                Error::new(format!("unhandled panic: {text}"))
            }
        }
    }
}
