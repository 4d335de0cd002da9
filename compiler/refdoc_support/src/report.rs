//! Console reporting.
//!
//! All output goes through `tracing`, so the driver's subscriber decides
//! where it ends up.

use std::fmt;

use crate::Error;

/// Report a warning.
pub fn report_warning(text: &str) {
    tracing::warn!("{text}");
}

/// Report information.
pub fn report_info(text: &str) {
    tracing::info!("{text}");
}

/// Report the failure of an operation, in the form
/// `Could not {op} because {reason}`.
pub fn report_failure(err: &Error, op: impl fmt::Display) {
    debug_assert!(err.failed());
    match err.location() {
        Some(loc) => {
            let location = format!("{}:{}", loc.file(), loc.line());
            tracing::error!(%location, "Could not {op} because {err}");
        }
        None => tracing::error!("Could not {op} because {err}"),
    }
}
