//! Masked hex text encoding.
//!
//! Every byte is XOR-ed with [`MASK`] and written as two uppercase hex
//! digits. Text can optionally be compressed into a record first, which
//! shrinks long repetitive strings before they are hex-expanded.

use lzscan_core::CodecConfig;

use crate::error::{CodecError, Result};
use crate::record;

/// Byte mask applied before hex encoding.
pub const MASK: u8 = 0xac;

pub fn encode(data: &[u8]) -> String {
    let masked: Vec<u8> = data.iter().map(|b| b ^ MASK).collect();
    ::hex::encode_upper(masked)
}

/// Decode hex digits in either case and strip the mask.
pub fn decode(text: &str) -> Result<Vec<u8>> {
    let mut data = ::hex::decode(text).map_err(|e| CodecError::InvalidHex(e.to_string()))?;
    data.iter_mut().for_each(|b| *b ^= MASK);
    Ok(data)
}

/// Encode text as masked hex, compressing it first when `compress` is set.
/// Blank text encodes to an empty string.
pub fn encode_str(text: &str, compress: bool) -> Result<String> {
    if text.trim().is_empty() {
        return Ok(String::new());
    }
    if compress {
        Ok(encode(&record::compress_str(text)?))
    } else {
        Ok(encode(text.as_bytes()))
    }
}

/// Reverse of [`encode_str`]; `compress` must match the encoding side.
pub fn decode_str(text: &str, compress: bool) -> Result<String> {
    if text.trim().is_empty() {
        return Ok(String::new());
    }
    let data = decode(text)?;
    if compress {
        record::decompress_to_string(&data)
    } else {
        String::from_utf8(data).map_err(|_| CodecError::InvalidUtf8)
    }
}

/// [`encode_str`] with compression taken from configuration.
pub fn encode_str_with(text: &str, config: &CodecConfig) -> Result<String> {
    encode_str(text, config.compress_hex)
}

/// [`decode_str`] with compression taken from configuration.
pub fn decode_str_with(text: &str, config: &CodecConfig) -> Result<String> {
    decode_str(text, config.compress_hex)
}
