//! Support library for refdoc.
//!
//! Provides the vocabulary shared by every other refdoc crate:
//!
//! - [`Error`]: a cheap value describing a failure, or success, with
//!   aggregation of many failures into one
//! - [`Expected`]: a value or an error
//! - [`Exception`]: the unwind used at hard boundaries
//! - [`ThreadPool`] and [`TaskGroup`]: bounded parallel work joined as a unit
//! - [`report`] and [`path`] helpers

mod error;
mod exception;
mod expected;
pub mod path;
pub mod report;
mod thread_pool;

pub use error::Error;
pub use exception::Exception;
pub use expected::Expected;
pub use thread_pool::{TaskGroup, ThreadPool};
