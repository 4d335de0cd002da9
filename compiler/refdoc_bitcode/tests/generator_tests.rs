//! End-to-end tests for the bitcode generator.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use pretty_assertions::assert_eq;
use refdoc_bitcode::{read_bitcode, read_bitcode_stream, write_bitcode, BitcodeGenerator, Generator};
use refdoc_corpus::{Config, Corpus, SafeNames, SymbolId, SymbolKind};

/// Seven symbols, including the global namespace and an overload pair.
fn sample_corpus() -> Corpus {
    let mut builder = Corpus::builder();
    let ns = builder
        .add(SymbolId::GLOBAL, SymbolKind::Namespace, "shapes")
        .unwrap();
    let circle = builder.add(ns, SymbolKind::Record, "Circle").unwrap();
    builder.add(circle, SymbolKind::Field, "radius").unwrap();
    builder.add(ns, SymbolKind::Function, "area").unwrap();
    builder.add(ns, SymbolKind::Function, "area").unwrap();
    builder
        .add(SymbolId::GLOBAL, SymbolKind::Typedef, "real")
        .unwrap();
    let symbol = builder.symbol_mut(circle).unwrap();
    symbol.doc = Some("A round shape.".to_owned());
    builder.build().unwrap()
}

fn artifact_path(dir: &Path, names: &SafeNames, id: SymbolId) -> std::path::PathBuf {
    dir.join(format!("{}.bc", names.get(id).unwrap()))
}

fn count_files(dir: &Path) -> usize {
    fs::read_dir(dir)
        .unwrap()
        .filter(|entry| entry.as_ref().unwrap().file_type().unwrap().is_file())
        .count()
}

#[test]
fn generator_identity() {
    let generator = BitcodeGenerator;
    assert_eq!(generator.id(), "bitcode");
    assert_eq!(generator.display_name(), "Bitcode");
    assert_eq!(generator.file_extension(), "bc");
}

#[test]
fn writes_one_artifact_per_symbol() {
    let corpus = sample_corpus();
    let names = SafeNames::new(&corpus).unwrap();
    let dir = tempfile::tempdir().unwrap();

    for threads in [1, 4] {
        let config = Config::default().with_concurrency(threads);
        BitcodeGenerator.build(dir.path(), &corpus, &config).unwrap();
        assert_eq!(count_files(dir.path()), corpus.len());
    }

    for symbol in corpus.symbols() {
        let bytes = fs::read(artifact_path(dir.path(), &names, symbol.id)).unwrap();
        assert_eq!(&read_bitcode(&bytes).unwrap(), symbol);
    }
    assert!(dir.path().join("global.bc").is_file());
    assert!(dir.path().join("shapes-area.bc").is_file());
    assert!(dir.path().join("shapes-area-2.bc").is_file());
    assert!(dir.path().join("shapes-Circle-radius.bc").is_file());
}

#[test]
fn unwritable_targets_are_aggregated() {
    let corpus = sample_corpus();
    let names = SafeNames::new(&corpus).unwrap();
    let dir = tempfile::tempdir().unwrap();

    // A directory in place of an artifact makes it impossible to open.
    let blocked: Vec<SymbolId> = corpus
        .preorder()
        .iter()
        .filter(|s| s.name == "area" || s.kind == SymbolKind::Typedef)
        .map(|s| s.id)
        .collect();
    assert_eq!(blocked.len(), 3);
    for id in &blocked {
        fs::create_dir(artifact_path(dir.path(), &names, *id)).unwrap();
    }

    let config = Config::default().with_concurrency(2);
    let err = BitcodeGenerator
        .build(dir.path(), &corpus, &config)
        .unwrap_err();

    let message = err.message();
    assert!(message.starts_with("3 errors occurred:"), "{message}");
    for id in &blocked {
        let path = artifact_path(dir.path(), &names, *id);
        assert!(
            message.contains(&format!("Could not open \"{}\" because", path.display())),
            "{message}"
        );
    }
    assert_eq!(count_files(dir.path()), corpus.len() - blocked.len());
}

#[test]
fn single_unwritable_target() {
    let corpus = sample_corpus();
    let names = SafeNames::new(&corpus).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let target = artifact_path(dir.path(), &names, SymbolId::GLOBAL);
    fs::create_dir(&target).unwrap();

    let err = BitcodeGenerator
        .build(dir.path(), &corpus, &Config::default())
        .unwrap_err();
    assert!(err
        .message()
        .starts_with(&format!("Could not open \"{}\" because", target.display())));
    assert_eq!(count_files(dir.path()), corpus.len() - 1);
}

#[test]
fn rerun_is_idempotent() {
    let corpus = sample_corpus();
    let dir = tempfile::tempdir().unwrap();
    let config = Config::default().with_concurrency(3);

    BitcodeGenerator.build(dir.path(), &corpus, &config).unwrap();
    let snapshot = |dir: &Path| {
        let mut files: Vec<(String, Vec<u8>)> = fs::read_dir(dir)
            .unwrap()
            .map(|entry| {
                let entry = entry.unwrap();
                (
                    entry.file_name().to_string_lossy().into_owned(),
                    fs::read(entry.path()).unwrap(),
                )
            })
            .collect();
        files.sort();
        files
    };
    let first = snapshot(dir.path());

    BitcodeGenerator.build(dir.path(), &corpus, &config).unwrap();
    assert_eq!(snapshot(dir.path()), first);
}

#[test]
fn single_stream_holds_every_symbol_in_order() {
    let corpus = sample_corpus();
    let mut out = Vec::new();
    BitcodeGenerator
        .build_one(&mut out, &corpus, &Config::default())
        .unwrap();

    let decoded = read_bitcode_stream(&out).unwrap();
    let expected: Vec<_> = corpus.preorder().into_iter().cloned().collect();
    assert_eq!(decoded, expected);
}

#[test]
fn single_stream_to_file() {
    let corpus = sample_corpus();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("all.bc");
    fs::write(&path, b"stale contents").unwrap();

    BitcodeGenerator
        .build_one_to_file(&path, &corpus, &Config::default())
        .unwrap();
    let decoded = read_bitcode_stream(&fs::read(&path).unwrap()).unwrap();
    assert_eq!(decoded.len(), corpus.len());
}

#[test]
fn single_stream_to_missing_directory() {
    let corpus = sample_corpus();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("all.bc");
    let err = BitcodeGenerator
        .build_one_to_file(&path, &corpus, &Config::default())
        .unwrap_err();
    assert!(err
        .message()
        .starts_with(&format!("Could not open \"{}\" because", path.display())));
}

/// Accepts `limit` bytes, then fails every write.
struct FailingWriter {
    accepted: Vec<u8>,
    limit: usize,
    attempts: usize,
}

impl FailingWriter {
    fn new(limit: usize) -> Self {
        FailingWriter {
            accepted: Vec::new(),
            limit,
            attempts: 0,
        }
    }
}

impl Write for FailingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.attempts += 1;
        let room = self.limit - self.accepted.len();
        if room == 0 {
            return Err(io::Error::new(io::ErrorKind::Other, "disk full"));
        }
        let n = room.min(buf.len());
        self.accepted.extend_from_slice(&buf[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn single_stream_stops_at_first_failure() {
    let corpus = sample_corpus();
    let mut os = FailingWriter::new(0);
    let err = BitcodeGenerator
        .build_one(&mut os, &corpus, &Config::default())
        .unwrap_err();

    assert_eq!(err.reason(), "disk full");
    assert!(err.message().starts_with("Could not write symbol"));
    assert_eq!(os.attempts, 1);
    assert!(os.accepted.is_empty());
}

#[test]
fn single_stream_keeps_complete_prefix() {
    let corpus = sample_corpus();
    let root = write_bitcode(corpus.global_namespace()).unwrap();
    let mut os = FailingWriter::new(root.len());
    let err = BitcodeGenerator
        .build_one(&mut os, &corpus, &Config::default())
        .unwrap_err();
    assert_eq!(err.reason(), "disk full");
    assert_eq!(os.attempts, 2);

    let decoded = read_bitcode_stream(&os.accepted).unwrap();
    assert_eq!(decoded, vec![corpus.global_namespace().clone()]);
}

#[test]
fn empty_corpus_writes_only_the_global_namespace() {
    let corpus = Corpus::builder().build().unwrap();
    assert!(corpus.is_empty());
    let dir = tempfile::tempdir().unwrap();

    BitcodeGenerator
        .build(dir.path(), &corpus, &Config::default())
        .unwrap();
    let files: Vec<String> = fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(files, vec!["global.bc".to_owned()]);

    let mut out = Vec::new();
    BitcodeGenerator
        .build_one(&mut out, &corpus, &Config::default())
        .unwrap();
    let decoded = read_bitcode_stream(&out).unwrap();
    assert_eq!(decoded, vec![corpus.global_namespace().clone()]);
}
