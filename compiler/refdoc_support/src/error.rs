//! Error values.
//!
//! An [`Error`] is a plain value describing a failure, or success when its
//! message is empty. Errors are cheap to clone and move, which lets callers
//! collect many independent failures and fold them into one with
//! [`Error::from_errors`] instead of stopping at the first one.
//!
//! Errors only become unwinds at hard boundaries, through
//! [`Error::throw_if_failed`]. See [`Exception`](crate::Exception).

use std::fmt::{self, Write as _};
use std::hash::{Hash, Hasher};
use std::io;
use std::panic::Location;

use crate::Exception;

/// Holds the description of an error, or success.
///
/// A default constructed `Error` is equivalent to success. Two errors
/// compare equal when their messages are equal; the reason and the source
/// location do not take part in comparison or hashing.
#[derive(Clone, Default)]
#[must_use]
pub struct Error {
    message: String,
    reason: String,
    location: Option<&'static Location<'static>>,
}

impl Error {
    /// Return a value indicating success.
    #[inline]
    pub fn success() -> Self {
        Error::default()
    }

    /// Create a failed error from free text.
    ///
    /// The location of the caller is recorded as the place where the
    /// error was raised. `message` must not be empty.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        debug_assert!(!message.is_empty(), "error message must not be empty");
        Error {
            message,
            reason: String::new(),
            location: Some(Location::caller()),
        }
    }

    /// Create a failed error with an additional reason fragment.
    #[track_caller]
    pub fn with_reason(message: impl Into<String>, reason: impl Into<String>) -> Self {
        Error {
            reason: reason.into(),
            ..Error::new(message)
        }
    }

    /// Create an error from an I/O error.
    #[track_caller]
    pub fn from_io(err: &io::Error) -> Self {
        Error::new(err.to_string())
    }

    /// Combine zero or more errors into one.
    ///
    /// If the list is empty, or every element indicates success, the
    /// result indicates success. A single failure is returned unchanged.
    /// Otherwise every failing message follows on a new line, indented by
    /// four spaces on its first line and otherwise unchanged.
    #[track_caller]
    pub fn from_errors(errors: &[Error]) -> Self {
        let failures: Vec<&Error> = errors.iter().filter(|err| err.failed()).collect();
        match failures.as_slice() {
            [] => Error::success(),
            [only] => (*only).clone(),
            many => {
                let mut message = format!("{} errors occurred:", many.len());
                for err in many {
                    // Messages are kept whole so each stays a substring.
                    let _ = write!(message, "\n    {}", err.message);
                }
                Error {
                    message,
                    reason: String::new(),
                    location: Some(Location::caller()),
                }
            }
        }
    }

    /// Describe this error as the failure of an operation.
    ///
    /// Produces `Could not {op} because {message}`; the previous message
    /// becomes the reason. Success is returned unchanged.
    pub fn context(self, op: impl fmt::Display) -> Self {
        if !self.failed() {
            return self;
        }
        Error {
            message: format!("Could not {op} because {}", self.message),
            reason: self.message,
            location: self.location,
        }
    }

    /// Return true if this holds an error.
    #[inline]
    pub fn failed(&self) -> bool {
        !self.message.is_empty()
    }

    /// Return the error string.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Return the reason string.
    #[inline]
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Return the location where the error was raised, if it failed.
    #[inline]
    pub fn location(&self) -> Option<&'static Location<'static>> {
        self.location
    }

    /// Unwind with an [`Exception`] carrying this error.
    ///
    /// # Panics
    ///
    /// Always. Calling this on success is a contract violation.
    pub fn throw(self) -> ! {
        assert!(self.failed(), "Error::throw called on success");
        std::panic::panic_any(Exception::new(self))
    }

    /// Unwind with an [`Exception`] if this holds an error.
    pub fn throw_if_failed(&self) {
        if self.failed() {
            self.clone().throw();
        }
    }

    /// Convert into a `Result`, for use with `?`.
    pub fn into_result(self) -> Result<(), Error> {
        if self.failed() {
            Err(self)
        } else {
            Ok(())
        }
    }
}

impl From<Vec<Error>> for Error {
    #[track_caller]
    fn from(errors: Vec<Error>) -> Self {
        Error::from_errors(&errors)
    }
}

impl From<Result<(), Error>> for Error {
    fn from(result: Result<(), Error>) -> Self {
        result.err().unwrap_or_default()
    }
}

impl From<io::Error> for Error {
    #[track_caller]
    fn from(err: io::Error) -> Self {
        Error::from_io(&err)
    }
}

impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        self.message == other.message
    }
}

impl Eq for Error {}

impl Hash for Error {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.message.hash(state);
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.failed() {
            return f.write_str("Error(success)");
        }
        let mut s = f.debug_struct("Error");
        s.field("message", &self.message);
        if !self.reason.is_empty() {
            s.field("reason", &self.reason);
        }
        if let Some(loc) = self.location {
            s.field(
                "location",
                &format_args!("{}:{}:{}", loc.file(), loc.line(), loc.column()),
            );
        }
        s.finish()
    }
}

impl std::error::Error for Error {}

/// Return a formatted error raised at the caller's location.
///
/// ```text
/// return Err(format_error!("\"{}\" is not a directory", path.display()));
/// ```
#[macro_export]
macro_rules! format_error {
    ($($arg:tt)*) => {
        $crate::Error::new(::std::format!($($arg)*))
    };
}
