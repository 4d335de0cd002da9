//! Settings shared by every generator.

use refdoc_support::{Error, ThreadPool};

/// Options for one documentation run.
///
/// Passed by reference to generators; nothing here is read from disk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Number of worker threads. Zero uses every available core.
    pub concurrency: usize,
    /// Log progress at `info` level instead of `debug`.
    pub verbose: bool,
    /// Report failures without escalating them.
    pub ignore_failures: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            concurrency: 0,
            verbose: false,
            ignore_failures: false,
        }
    }
}

impl Config {
    #[must_use]
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    #[must_use]
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    #[must_use]
    pub fn with_ignore_failures(mut self, ignore_failures: bool) -> Self {
        self.ignore_failures = ignore_failures;
        self
    }

    /// Build the worker pool described by `concurrency`.
    pub fn thread_pool(&self) -> Result<ThreadPool, Error> {
        ThreadPool::new(self.concurrency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builders_set_fields() {
        let config = Config::default()
            .with_concurrency(3)
            .with_verbose(true)
            .with_ignore_failures(true);
        assert_eq!(config.concurrency, 3);
        assert!(config.verbose);
        assert!(config.ignore_failures);
        assert_eq!(config.thread_pool().unwrap().thread_count(), 3);
    }

    #[test]
    fn default_uses_available_parallelism() {
        let pool = Config::default().thread_pool().unwrap();
        assert!(pool.thread_count() >= 1);
    }
}
