use crate::*;
use crate::hex;
use crate::lzf::{max_compressed_len, MAX_LITERAL};
use lzscan_core::CodecConfig;

fn compress_vec(input: &[u8]) -> Vec<u8> {
    let mut out = vec![0u8; max_compressed_len(input.len())];
    let n = lzf::compress(input, &mut out).unwrap();
    out.truncate(n);
    out
}

fn decompress_vec(input: &[u8], len: usize) -> Vec<u8> {
    let mut out = vec![0u8; len];
    let n = lzf::decompress(input, &mut out).unwrap();
    assert_eq!(n, len);
    out
}

// ========== LZF: compress ==========

#[test]
fn test_lzf_empty() {
    let mut out = [0u8; 4];
    assert_eq!(lzf::compress(&[], &mut out).unwrap(), 0);
    assert_eq!(lzf::decompress(&[], &mut out).unwrap(), 0);
}

#[test]
fn test_lzf_empty_into_empty_buffer() {
    assert_eq!(lzf::compress(&[], &mut []).unwrap(), 0);
}

#[test]
fn test_lzf_short_literal() {
    assert_eq!(compress_vec(b"abc"), vec![0x02, b'a', b'b', b'c']);
    assert_eq!(compress_vec(b"x"), vec![0x00, b'x']);
}

#[test]
fn test_lzf_literal_runs_split_at_max() {
    let input: Vec<u8> = (0u8..40).collect();
    let out = compress_vec(&input);
    assert_eq!(out.len(), 42);
    assert_eq!(out[0], (MAX_LITERAL - 1) as u8);
    assert_eq!(&out[1..33], &input[..32]);
    assert_eq!(out[33], 7);
    assert_eq!(&out[34..], &input[32..]);
}

#[test]
fn test_lzf_short_back_reference() {
    let out = compress_vec(b"aaaaaaaaaa");
    assert_eq!(out, vec![0x01, b'a', b'a', 0x80, 0x00, 0x01, b'a', b'a']);
    assert_eq!(decompress_vec(&out, 10), b"aaaaaaaaaa");
}

#[test]
fn test_lzf_long_back_reference() {
    let input = vec![b'a'; 300];
    let out = compress_vec(&input);
    // literal "aa", then a 264-byte reference with the extension byte at 255
    assert_eq!(&out[..6], &[0x01, b'a', b'a', 0xE0, 0xFF, 0x00]);
    assert_eq!(out.len(), 12);
    assert_eq!(decompress_vec(&out, 300), input);
}

#[test]
fn test_lzf_repeated_text_shrinks() {
    let input = "the quick brown fox jumps over the lazy dog. ".repeat(20);
    let out = compress_vec(input.as_bytes());
    assert!(out.len() < input.len() / 4);
    assert_eq!(decompress_vec(&out, input.len()), input.as_bytes());
}

#[test]
fn test_lzf_output_too_small() {
    let mut out = [0u8; 3];
    let err = lzf::compress(b"abc", &mut out).unwrap_err();
    assert_eq!(err, CodecError::OutputTooSmall { needed: 4, capacity: 3 });
}

#[test]
fn test_lzf_never_writes_past_capacity() {
    let input = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let mut buf = [0x5Au8; 64];
    assert!(lzf::compress(input, &mut buf[..20]).is_err());
    assert!(buf[20..].iter().all(|&b| b == 0x5A));
}

#[test]
fn test_lzf_max_compressed_len() {
    assert_eq!(max_compressed_len(0), 1);
    assert_eq!(max_compressed_len(32), 34);
    let input: Vec<u8> = (0..=255u8).cycle().take(1000).collect();
    let mut out = vec![0u8; max_compressed_len(input.len())];
    assert!(lzf::compress(&input, &mut out).is_ok());
}

#[test]
fn test_compressor_reuse_is_deterministic() {
    let first = b"abcabcabcabcabcabc xyz xyz xyz xyz".to_vec();
    let second = b"hello hello hello hello".to_vec();
    let mut compressor = Compressor::new();
    let mut out_a = vec![0u8; max_compressed_len(first.len())];
    let mut out_b = vec![0u8; max_compressed_len(second.len())];

    let _ = compressor.compress(&first, &mut out_a).unwrap();
    let n = compressor.compress(&second, &mut out_b).unwrap();
    out_b.truncate(n);
    assert_eq!(out_b, compress_vec(&second));
}

// ========== LZF: decompress ==========

#[test]
fn test_lzf_decompress_overlapping_reference() {
    // "ab", then copy 6 bytes from 2 back
    let stream = [0x01, b'a', b'b', 0x80, 0x01];
    assert_eq!(decompress_vec(&stream, 8), b"abababab");
}

#[test]
fn test_lzf_decompress_reference_before_start() {
    let mut out = [0u8; 16];
    let err = lzf::decompress(&[0x20, 0x00], &mut out).unwrap_err();
    assert_eq!(err, CodecError::CorruptReference { position: 0 });
}

#[test]
fn test_lzf_decompress_truncated_literal() {
    let mut out = [0u8; 16];
    let err = lzf::decompress(&[0x05, 1, 2], &mut out).unwrap_err();
    assert_eq!(err, CodecError::TruncatedInput { position: 0 });
}

#[test]
fn test_lzf_decompress_truncated_reference() {
    let mut out = [0u8; 16];
    let err = lzf::decompress(&[0x00, b'a', 0x20], &mut out).unwrap_err();
    assert_eq!(err, CodecError::TruncatedInput { position: 2 });
    let err = lzf::decompress(&[0x00, b'a', 0xE0], &mut out).unwrap_err();
    assert_eq!(err, CodecError::TruncatedInput { position: 2 });
}

#[test]
fn test_lzf_decompress_output_too_small() {
    let stream = compress_vec(b"aaaaaaaaaa");
    let mut out = [0u8; 9];
    let err = lzf::decompress(&stream, &mut out).unwrap_err();
    assert!(matches!(err, CodecError::OutputTooSmall { .. }));
}

// ========== Record ==========

#[test]
fn test_record_empty() {
    assert!(record::compress(&[]).unwrap().is_empty());
    assert!(record::decompress(&[]).unwrap().is_empty());
}

#[test]
fn test_record_header() {
    let data = b"hello hello hello";
    let rec = record::compress(data).unwrap();
    assert_eq!(&rec[..4], &(data.len() as i32).to_le_bytes());
    assert_eq!(record::decompress(&rec).unwrap(), data);
}

#[test]
fn test_record_zero_length_header() {
    assert!(record::decompress(&[0, 0, 0, 0]).unwrap().is_empty());
}

#[test]
fn test_record_too_short() {
    let err = record::decompress(&[1, 2]).unwrap_err();
    assert_eq!(err, CodecError::RecordTooShort { len: 2 });
}

#[test]
fn test_record_negative_length() {
    let err = record::decompress(&[0xff, 0xff, 0xff, 0xff, 0x00, b'a']).unwrap_err();
    assert_eq!(err, CodecError::InvalidLength(-1));
}

#[test]
fn test_record_length_beyond_payload_capacity() {
    let err = record::decompress(&[0xff, 0xff, 0xff, 0x7f, 0x00, b'a']).unwrap_err();
    assert_eq!(err, CodecError::InvalidLength(i32::MAX));
}

#[test]
fn test_record_long_runs_within_payload_capacity() {
    let data = vec![b'z'; 3000];
    let rec = record::compress(&data).unwrap();
    assert_eq!(record::decompress(&rec).unwrap(), data);
}

#[test]
fn test_record_payload_shorter_than_header() {
    let err = record::decompress(&[5, 0, 0, 0, 0x02, b'a', b'b', b'c']).unwrap_err();
    assert_eq!(err, CodecError::LengthMismatch { expected: 5, actual: 3 });
}

#[test]
fn test_record_payload_longer_than_header() {
    let err = record::decompress(&[2, 0, 0, 0, 0x02, b'a', b'b', b'c']).unwrap_err();
    assert!(matches!(err, CodecError::OutputTooSmall { .. }));
}

#[test]
fn test_record_str_roundtrip() {
    let text = "Grüße, 世界! Grüße, 世界! Grüße, 世界!";
    let rec = record::compress_str(text).unwrap();
    assert_eq!(record::decompress_to_string(&rec).unwrap(), text);
}

#[test]
fn test_record_str_blank() {
    assert!(record::compress_str("").unwrap().is_empty());
    assert!(record::compress_str(" \t\n").unwrap().is_empty());
    assert_eq!(record::decompress_to_string(&[]).unwrap(), "");
}

#[test]
fn test_record_invalid_utf8() {
    let rec = record::compress(&[0xff, 0xfe, 0xfd]).unwrap();
    assert_eq!(record::decompress_to_string(&rec).unwrap_err(), CodecError::InvalidUtf8);
}

// ========== Hex ==========

#[test]
fn test_hex_encode_masks_bytes() {
    assert_eq!(hex::encode(&[0x00]), "AC");
    assert_eq!(hex::encode(b"A"), "ED");
    assert_eq!(hex::encode(&[]), "");
}

#[test]
fn test_hex_decode_accepts_lowercase() {
    assert_eq!(hex::decode("ed").unwrap(), b"A");
    assert_eq!(hex::decode("EDac").unwrap(), vec![b'A', 0x00]);
}

#[test]
fn test_hex_decode_rejects_bad_input() {
    assert!(matches!(hex::decode("ABC"), Err(CodecError::InvalidHex(_))));
    assert!(matches!(hex::decode("ZZ"), Err(CodecError::InvalidHex(_))));
    assert!(matches!(hex::decode("ED G"), Err(CodecError::InvalidHex(_))));
}

#[test]
fn test_hex_matches_reference_encoding() {
    let data = b"\x00\x7f\x80\xffmixed";
    let masked: Vec<u8> = data.iter().map(|b| b ^ hex::MASK).collect();
    assert_eq!(hex::encode(data), ::hex::encode_upper(&masked));
    assert_eq!(hex::decode(&::hex::encode(&masked)).unwrap(), data);
}

#[test]
fn test_hex_str_plain_roundtrip() {
    let encoded = hex::encode_str("hello", false).unwrap();
    assert_eq!(encoded.len(), 10);
    assert_eq!(hex::decode_str(&encoded, false).unwrap(), "hello");
}

#[test]
fn test_hex_str_compressed_roundtrip() {
    let text = "status=ok;status=ok;status=ok;status=ok;status=ok;";
    let plain = hex::encode_str(text, false).unwrap();
    let packed = hex::encode_str(text, true).unwrap();
    assert!(packed.len() < plain.len());
    assert_eq!(hex::decode_str(&packed, true).unwrap(), text);
}

#[test]
fn test_hex_str_blank() {
    assert_eq!(hex::encode_str("  ", true).unwrap(), "");
    assert_eq!(hex::decode_str("", true).unwrap(), "");
}

#[test]
fn test_hex_str_with_config() {
    let config = CodecConfig { compress_hex: true };
    let text = "abcabcabcabcabcabcabcabc";
    let encoded = hex::encode_str_with(text, &config).unwrap();
    assert_eq!(encoded, hex::encode_str(text, true).unwrap());
    assert_eq!(hex::decode_str_with(&encoded, &config).unwrap(), text);
}
