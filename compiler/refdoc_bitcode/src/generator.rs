//! Output generators and the bitcode generator.

mod multi_file;
mod single_file;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use refdoc_corpus::{Config, Corpus};
use refdoc_support::Error;

use multi_file::MultiFileBuilder;
use single_file::SingleFileBuilder;

/// A named output format.
///
/// A generator can emit one artifact per symbol into a directory, or every
/// symbol into a single stream.
pub trait Generator: Send + Sync {
    /// Return the symbolic name used to select this generator.
    fn id(&self) -> &'static str;

    /// Return a human-readable name.
    fn display_name(&self) -> &'static str;

    /// Return the extension of produced files, without the dot.
    fn file_extension(&self) -> &'static str;

    /// Write one artifact per symbol into `output_dir`.
    ///
    /// Failures for individual symbols do not stop the others; they are
    /// returned together as one error once all work finished.
    fn build(&self, output_dir: &Path, corpus: &Corpus, config: &Config) -> Result<(), Error>;

    /// Write every symbol to `os`, stopping at the first failure.
    fn build_one(&self, os: &mut dyn Write, corpus: &Corpus, config: &Config)
        -> Result<(), Error>;

    /// Write every symbol to the file at `path`, replacing it.
    fn build_one_to_file(&self, path: &Path, corpus: &Corpus, config: &Config) -> Result<(), Error> {
        let file = File::create(path).map_err(|e| {
            Error::from_io(&e).context(format_args!("open \"{}\"", path.display()))
        })?;
        let mut os = BufWriter::new(file);
        self.build_one(&mut os, corpus, config)
    }
}

/// Emits symbols in the binary artifact format.
#[derive(Clone, Copy, Debug, Default)]
pub struct BitcodeGenerator;

impl Generator for BitcodeGenerator {
    fn id(&self) -> &'static str {
        "bitcode"
    }

    fn display_name(&self) -> &'static str {
        "Bitcode"
    }

    fn file_extension(&self) -> &'static str {
        "bc"
    }

    #[tracing::instrument(level = "debug", skip_all, fields(output = %output_dir.display()))]
    fn build(&self, output_dir: &Path, corpus: &Corpus, config: &Config) -> Result<(), Error> {
        MultiFileBuilder::build(output_dir, self.file_extension(), corpus, config)
    }

    #[tracing::instrument(level = "debug", skip_all)]
    fn build_one(
        &self,
        os: &mut dyn Write,
        corpus: &Corpus,
        config: &Config,
    ) -> Result<(), Error> {
        SingleFileBuilder::build(os, corpus, config)
    }
}
