//! Reference documentation generation.
//!
//! The driver ties the pieces together: it picks a generator from the
//! [`GeneratorRegistry`], prepares the output location, runs the generator
//! over a [`Corpus`] and decides whether failures are fatal.
//!
//! ```text
//! Corpus ──► SafeNames ──► Generator::build ──► <output>/<name>.bc
//!                      └─► Generator::build_one ──► <output>
//! ```

mod registry;

use std::path::PathBuf;
use std::sync::Once;

pub use refdoc_bitcode::{BitcodeGenerator, Generator};
pub use refdoc_corpus::{Config, Corpus, CorpusBuilder, SafeNames, Symbol, SymbolId, SymbolKind};
pub use refdoc_dom as dom;
pub use refdoc_support::{Error, Exception, Expected};
pub use registry::GeneratorRegistry;

use refdoc_support::path::{create_directory, is_dirsy, normalize_path, require_directory};
use refdoc_support::{format_error, report};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing from `RUST_LOG`.
///
/// Does nothing unless `RUST_LOG` is set. Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            // Another subscriber may already be installed by the host.
            let _ = tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .try_init();
        }
    });
}

/// What to generate and where.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Id of the generator, e.g. `bitcode`.
    pub generator: String,
    /// Output directory, or output file when `single_file` is set.
    pub output: PathBuf,
    pub single_file: bool,
}

impl GenerateOptions {
    pub fn new(generator: impl Into<String>, output: impl Into<PathBuf>) -> Self {
        GenerateOptions {
            generator: generator.into(),
            output: output.into(),
            single_file: false,
        }
    }

    #[must_use]
    pub fn with_single_file(mut self, single_file: bool) -> Self {
        self.single_file = single_file;
        self
    }
}

/// Run the selected generator over `corpus`.
///
/// In directory mode the output directory is created if needed and every
/// per-symbol failure is returned together. In single-file mode the first
/// failure ends the run.
#[tracing::instrument(
    level = "debug",
    skip_all,
    fields(generator = %options.generator, output = %options.output.display())
)]
pub fn generate(config: &Config, options: &GenerateOptions, corpus: &Corpus) -> Result<(), Error> {
    generate_with(&GeneratorRegistry::with_builtins(), config, options, corpus)
}

/// Like [`generate`], choosing from the generators in `registry`.
pub fn generate_with(
    registry: &GeneratorRegistry,
    config: &Config,
    options: &GenerateOptions,
    corpus: &Corpus,
) -> Result<(), Error> {
    let generator = registry.find(&options.generator).ok_or_else(|| {
        format_error!("the generator \"{}\" was not found", options.generator)
    })?;
    let output = normalize_path(&options.output);

    if options.single_file {
        if is_dirsy(&options.output.to_string_lossy()) {
            return Err(format_error!(
                "the single-file output \"{}\" names a directory",
                options.output.display()
            ));
        }
        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            create_directory(parent)?;
        }
        tracing::debug!(generator = generator.id(), "building single file");
        generator.build_one_to_file(&output, corpus, config)
    } else {
        create_directory(&output)?;
        require_directory(&output)?;
        tracing::debug!(generator = generator.id(), "building artifacts");
        generator.build(&output, corpus, config)
    }
}

/// Generate and report the outcome.
///
/// Failures are reported through tracing. Unless `config.ignore_failures`
/// is set, a failure then unwinds with an [`Exception`]; the returned error
/// is only seen when failures are ignored.
pub fn run(config: &Config, options: &GenerateOptions, corpus: &Corpus) -> Error {
    let err = match generate(config, options, corpus) {
        Ok(()) => {
            if config.verbose {
                report::report_info(&format!(
                    "Generated {} documentation in \"{}\"",
                    options.generator,
                    options.output.display()
                ));
            }
            return Error::success();
        }
        Err(err) => err,
    };
    report::report_failure(&err, "generate reference documentation");
    if !config.ignore_failures {
        err.throw_if_failed();
    }
    report::report_warning("continuing because failures are ignored");
    err
}
