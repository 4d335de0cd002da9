//! Binary symbol artifacts.
//!
//! [`BitcodeGenerator`] writes every symbol of a corpus either as one file
//! per symbol, named by its safe name, or as a single concatenated stream.
//! [`read_bitcode`] and [`read_bitcode_stream`] decode the results.

mod bitcode;
mod generator;

pub use bitcode::{
    read_bitcode, read_bitcode_stream, write_bitcode, Bitcode, FORMAT_VERSION, MAGIC,
};
pub use generator::{BitcodeGenerator, Generator};
