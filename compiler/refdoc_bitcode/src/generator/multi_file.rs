//! One artifact file per symbol, written by the worker pool.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use refdoc_corpus::{walk_symbol, Config, Corpus, SafeNames, Symbol, Visitor};
use refdoc_support::path::append_file_name;
use refdoc_support::{format_error, Error, TaskGroup};

use crate::write_bitcode;

/// Walks the corpus on one thread and hands each symbol to the task group.
pub(super) struct MultiFileBuilder<'a, 't, 'scope> {
    output_dir: &'a Path,
    extension: &'static str,
    names: &'a SafeNames,
    group: &'a TaskGroup<'t, 'scope>,
}

impl MultiFileBuilder<'_, '_, '_> {
    pub(super) fn build(
        output_dir: &Path,
        extension: &'static str,
        corpus: &Corpus,
        config: &Config,
    ) -> Result<(), Error> {
        let names = SafeNames::new(corpus)?;
        let pool = config.thread_pool()?;
        if config.verbose {
            tracing::info!(
                symbols = corpus.len(),
                threads = pool.thread_count(),
                "writing artifacts"
            );
        }

        let mut traversal = Ok(());
        let mut errors = pool.task_group(|group| {
            let mut builder = MultiFileBuilder {
                output_dir,
                extension,
                names: &names,
                group,
            };
            traversal = corpus.traverse(&mut builder);
        });
        // A failed walk is reported alongside the task failures.
        if let Err(err) = traversal {
            errors.push(err);
        }

        if !errors.is_empty() {
            tracing::warn!(failures = errors.len(), "some artifacts were not written");
        }
        Error::from(errors).into_result()
    }
}

impl<'c: 'scope, 'scope> Visitor<'c> for MultiFileBuilder<'_, '_, 'scope> {
    fn visit_symbol(&mut self, corpus: &'c Corpus, symbol: &'c Symbol) -> Result<(), Error> {
        let Some(name) = self.names.get(symbol.id) else {
            return Err(format_error!("symbol {} has no safe name", symbol.id));
        };
        let path = append_file_name(self.output_dir, name, self.extension);
        self.group.spawn(move || write_artifact(symbol, &path));
        walk_symbol(self, corpus, symbol)
    }
}

fn write_artifact(symbol: &Symbol, path: &Path) -> Result<(), Error> {
    let bitcode = write_bitcode(symbol)?;
    let mut file = File::create(path)
        .map_err(|e| Error::from_io(&e).context(format_args!("open \"{}\"", path.display())))?;
    file.write_all(bitcode.as_bytes())
        .map_err(|e| Error::from_io(&e).context(format_args!("write \"{}\"", path.display())))?;
    tracing::trace!(path = %path.display(), bytes = bitcode.len(), "wrote artifact");
    Ok(())
}
