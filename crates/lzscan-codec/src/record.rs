//! Length-prefixed compressed records.
//!
//! Layout: `[i32 little-endian original length][raw LZF payload]`. There is
//! no magic number, version or checksum; reader and writer must agree on
//! the format out of band.

use byteorder::{ByteOrder, LittleEndian};

use crate::error::{CodecError, Result};
use crate::lzf::{self, Compressor};

/// Size of the original-length prefix.
pub const HEADER_LEN: usize = 4;

/// Most output one payload byte can produce: a 3-byte back reference
/// expands to at most [`lzf::MAX_REFERENCE`] bytes.
const MAX_EXPANSION: usize = lzf::MAX_REFERENCE / 3;

/// Compress `data` into a record. Empty input yields an empty record.
pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    compress_with(&mut Compressor::new(), data)
}

/// Compress `data` into a record, reusing `compressor`'s hash table.
pub fn compress_with(compressor: &mut Compressor, data: &[u8]) -> Result<Vec<u8>> {
    if data.is_empty() {
        return Ok(Vec::new());
    }
    let original_len =
        i32::try_from(data.len()).map_err(|_| CodecError::InputTooLarge(data.len()))?;

    let mut record = vec![0u8; HEADER_LEN + lzf::max_compressed_len(data.len())];
    LittleEndian::write_i32(&mut record[..HEADER_LEN], original_len);
    let written = compressor.compress(data, &mut record[HEADER_LEN..])?;
    record.truncate(HEADER_LEN + written);

    tracing::trace!(original = data.len(), record = record.len(), "compressed record");
    Ok(record)
}

/// Decompress a record produced by [`compress`].
///
/// An empty record decodes to empty data. The payload must expand to
/// exactly the length stored in the prefix; a prefix larger than the payload
/// could ever expand to is rejected before any allocation.
pub fn decompress(record: &[u8]) -> Result<Vec<u8>> {
    if record.is_empty() {
        return Ok(Vec::new());
    }
    if record.len() < HEADER_LEN {
        return Err(CodecError::RecordTooShort { len: record.len() });
    }

    let original_len = LittleEndian::read_i32(&record[..HEADER_LEN]);
    let expected = usize::try_from(original_len).map_err(|_| CodecError::InvalidLength(original_len))?;
    let payload = &record[HEADER_LEN..];
    if expected > payload.len().saturating_mul(MAX_EXPANSION) {
        tracing::debug!(expected, payload = payload.len(), "record length exceeds payload capacity");
        return Err(CodecError::InvalidLength(original_len));
    }

    let mut data = vec![0u8; expected];
    let actual = lzf::decompress(payload, &mut data)?;
    if actual != expected {
        tracing::debug!(expected, actual, "record payload length mismatch");
        return Err(CodecError::LengthMismatch { expected, actual });
    }
    Ok(data)
}

/// UTF-8 encode `text` and compress it into a record.
///
/// Blank text (empty or whitespace only) yields an empty record.
pub fn compress_str(text: &str) -> Result<Vec<u8>> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }
    compress(text.as_bytes())
}

/// Decompress a record and decode it as UTF-8.
pub fn decompress_to_string(record: &[u8]) -> Result<String> {
    let data = decompress(record)?;
    String::from_utf8(data).map_err(|_| CodecError::InvalidUtf8)
}
