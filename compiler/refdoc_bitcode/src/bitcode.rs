//! Encoding of one symbol into a self-contained binary artifact.
//!
//! An artifact is the 4-byte magic `RDOC`, the format version as a
//! little-endian `u32`, and the bincode encoding of the [`Symbol`].
//! Artifacts can be concatenated into a stream and decoded in order.

use refdoc_corpus::Symbol;
use refdoc_support::{format_error, Error};

/// Leading bytes of every artifact.
pub const MAGIC: [u8; 4] = *b"RDOC";

/// Version of the artifact layout. Bumped when `Symbol` changes shape.
pub const FORMAT_VERSION: u32 = 1;

const HEADER_LEN: usize = MAGIC.len() + 4;

/// The encoded bytes of one symbol.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bitcode {
    pub data: Vec<u8>,
}

impl Bitcode {
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Encode `symbol` as an artifact.
pub fn write_bitcode(symbol: &Symbol) -> Result<Bitcode, Error> {
    let payload = bincode::serialize(symbol)
        .map_err(|e| format_error!("could not encode symbol {}: {e}", symbol.id))?;
    let mut data = Vec::with_capacity(HEADER_LEN + payload.len());
    data.extend_from_slice(&MAGIC);
    data.extend_from_slice(&FORMAT_VERSION.to_le_bytes());
    data.extend_from_slice(&payload);
    Ok(Bitcode { data })
}

/// Decode a single artifact. Trailing bytes are an error.
pub fn read_bitcode(bytes: &[u8]) -> Result<Symbol, Error> {
    let mut rest = bytes;
    let symbol = read_one(&mut rest)?;
    if !rest.is_empty() {
        return Err(format_error!(
            "{} trailing bytes after symbol {}",
            rest.len(),
            symbol.id
        ));
    }
    Ok(symbol)
}

/// Decode every artifact of a concatenated stream, in order.
pub fn read_bitcode_stream(bytes: &[u8]) -> Result<Vec<Symbol>, Error> {
    let mut rest = bytes;
    let mut symbols = Vec::new();
    while !rest.is_empty() {
        let symbol = read_one(&mut rest)
            .map_err(|e| e.context(format_args!("decode artifact {}", symbols.len())))?;
        symbols.push(symbol);
    }
    Ok(symbols)
}

/// Decode one artifact from the front of `rest`, advancing it.
fn read_one(rest: &mut &[u8]) -> Result<Symbol, Error> {
    if rest.len() < HEADER_LEN {
        return Err(format_error!(
            "truncated header: {} of {HEADER_LEN} bytes",
            rest.len()
        ));
    }
    let (header, payload) = rest.split_at(HEADER_LEN);
    if header[..MAGIC.len()] != MAGIC {
        return Err(Error::new("not a refdoc bitcode artifact"));
    }
    let mut version = [0_u8; 4];
    version.copy_from_slice(&header[MAGIC.len()..]);
    let version = u32::from_le_bytes(version);
    if version != FORMAT_VERSION {
        return Err(format_error!("unsupported bitcode version {version}"));
    }
    *rest = payload;
    bincode::deserialize_from(rest).map_err(|e| format_error!("malformed symbol: {e}"))
}
