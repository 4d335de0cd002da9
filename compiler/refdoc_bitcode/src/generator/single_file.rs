//! Every symbol appended to one stream, on the calling thread.

use std::io::Write;

use refdoc_corpus::{walk_symbol, Config, Corpus, Symbol, Visitor};
use refdoc_support::Error;

use crate::write_bitcode;

pub(super) struct SingleFileBuilder<'w> {
    os: &'w mut dyn Write,
    written: usize,
}

impl<'w> SingleFileBuilder<'w> {
    pub(super) fn build(os: &'w mut dyn Write, corpus: &Corpus, config: &Config) -> Result<(), Error> {
        let mut builder = SingleFileBuilder { os, written: 0 };
        corpus.traverse(&mut builder)?;
        builder
            .os
            .flush()
            .map_err(|e| Error::from_io(&e).context("flush the output stream"))?;
        if config.verbose {
            tracing::info!(symbols = builder.written, "wrote symbol stream");
        }
        Ok(())
    }
}

impl<'c> Visitor<'c> for SingleFileBuilder<'_> {
    fn visit_symbol(&mut self, corpus: &'c Corpus, symbol: &'c Symbol) -> Result<(), Error> {
        let bitcode = write_bitcode(symbol)?;
        self.os.write_all(bitcode.as_bytes()).map_err(|e| {
            Error::from_io(&e).context(format_args!("write symbol {}", symbol.id))
        })?;
        self.written += 1;
        walk_symbol(self, corpus, symbol)
    }
}
