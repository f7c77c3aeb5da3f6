//! LZF byte codec and the wrappers built on it.
//!
//! - `lzf`: raw compressor/decompressor over caller-supplied buffers
//! - `record`: 4-byte little-endian length prefix + raw LZF payload
//! - `hex`: masked hex text encoding, optionally compressed into a record first

pub mod error;
pub mod hex;
pub mod lzf;
pub mod record;

pub use error::{CodecError, Result};
pub use lzf::Compressor;

#[cfg(test)]
mod tests;
