//! LZF compression over caller-supplied buffers.
//!
//! Stream format, one token at a time:
//!
//! - literal run: `000LLLLL` followed by `L + 1` raw bytes
//! - short back-reference: `LLLOOOOO oooooooo`, length `L + 2` with `1 <= L < 7`
//! - long back-reference: `111OOOOO llllllll oooooooo`, length `l + 9`
//!
//! The back offset is `(O << 8 | o) + 1` bytes behind the current output
//! position. A reference may overlap the bytes it produces.

use crate::error::{CodecError, Result};

const HASH_LOG: u32 = 14;
/// Number of slots in the match-finder hash table.
pub const HASH_SIZE: usize = 1 << HASH_LOG;
/// Longest literal run a single token can carry.
pub const MAX_LITERAL: usize = 1 << 5;
/// Largest back-reference distance.
pub const MAX_OFFSET: usize = 1 << 13;
/// Longest back-reference.
pub const MAX_REFERENCE: usize = (1 << 8) + (1 << 3);

/// Output capacity that is always large enough to compress `input_len` bytes.
pub fn max_compressed_len(input_len: usize) -> usize {
    input_len + input_len / MAX_LITERAL + 1
}

#[inline]
fn hash_first(input: &[u8], i: usize) -> u32 {
    (u32::from(input[i]) << 8) | u32::from(input[i + 1])
}

#[inline]
fn hash_next(hval: u32, input: &[u8], i: usize) -> u32 {
    (hval << 8) | u32::from(input[i + 2])
}

#[inline]
fn hash_slot(hval: u32) -> usize {
    let mixed = ((hval ^ (hval << 5)) >> (3 * 8 - HASH_LOG)).wrapping_sub(hval.wrapping_mul(5));
    mixed as usize & (HASH_SIZE - 1)
}

fn output_too_small(needed: usize, capacity: usize) -> CodecError {
    tracing::debug!(needed, capacity, "lzf output buffer exhausted");
    CodecError::OutputTooSmall { needed, capacity }
}

/// Write `lit` pending literals ending at `end` as one literal token.
fn flush_literals(input: &[u8], end: usize, lit: usize, output: &mut [u8], op: usize) -> usize {
    output[op] = (lit - 1) as u8;
    output[op + 1..op + 1 + lit].copy_from_slice(&input[end - lit..end]);
    op + 1 + lit
}

/// LZF compressor owning its hash table.
///
/// The table is cleared at the start of every [`Compressor::compress`] call,
/// so one instance can be reused for any number of inputs. Use one instance
/// per thread.
#[derive(Debug, Clone)]
pub struct Compressor {
    table: Box<[usize]>,
}

impl Compressor {
    pub fn new() -> Self {
        Self { table: vec![0; HASH_SIZE].into_boxed_slice() }
    }

    /// Compress `input` into `output`, returning the number of bytes written.
    ///
    /// Fails with [`CodecError::OutputTooSmall`] instead of writing past the
    /// end of `output`; a buffer of [`max_compressed_len`] bytes never fails.
    /// Empty input compresses to zero bytes.
    pub fn compress(&mut self, input: &[u8], output: &mut [u8]) -> Result<usize> {
        self.table.fill(0);

        let in_len = input.len();
        let out_len = output.len();
        let mut ip = 0;
        let mut op = 0;
        let mut lit = 0;
        let mut hval = if in_len >= 2 { hash_first(input, 0) } else { 0 };

        loop {
            if ip + 2 < in_len {
                hval = hash_next(hval, input, ip);
                let slot = hash_slot(hval);
                let reference = self.table[slot];
                self.table[slot] = ip;

                // Slot value 0 means empty, so position 0 is never a candidate.
                if reference > 0
                    && ip + 4 < in_len
                    && ip - reference - 1 < MAX_OFFSET
                    && input[reference..reference + 3] == input[ip..ip + 3]
                {
                    let off = ip - reference - 1;
                    let max_len = (in_len - ip - 2).min(MAX_REFERENCE);
                    let mut len = 3;
                    while len < max_len && input[reference + len] == input[ip + len] {
                        len += 1;
                    }

                    let encoded = len - 2;
                    let literal_bytes = if lit > 0 { lit + 1 } else { 0 };
                    let reference_bytes = if encoded < 7 { 2 } else { 3 };
                    let needed = op + literal_bytes + reference_bytes;
                    if needed > out_len {
                        return Err(output_too_small(needed, out_len));
                    }

                    if lit > 0 {
                        op = flush_literals(input, ip, lit, output, op);
                        lit = 0;
                    }

                    if encoded < 7 {
                        output[op] = ((off >> 8) + (encoded << 5)) as u8;
                        op += 1;
                    } else {
                        output[op] = ((off >> 8) + (7 << 5)) as u8;
                        output[op + 1] = (encoded - 7) as u8;
                        op += 2;
                    }
                    output[op] = (off & 0xff) as u8;
                    op += 1;

                    // Seed the last two positions of the match so the next
                    // token can still refer into it.
                    ip += encoded;
                    hval = hash_first(input, ip);
                    for _ in 0..2 {
                        hval = hash_next(hval, input, ip);
                        self.table[hash_slot(hval)] = ip;
                        ip += 1;
                    }
                    continue;
                }
            } else if ip == in_len {
                break;
            }

            lit += 1;
            ip += 1;

            if lit == MAX_LITERAL {
                let needed = op + 1 + MAX_LITERAL;
                if needed > out_len {
                    return Err(output_too_small(needed, out_len));
                }
                op = flush_literals(input, ip, lit, output, op);
                lit = 0;
            }
        }

        if lit > 0 {
            let needed = op + 1 + lit;
            if needed > out_len {
                return Err(output_too_small(needed, out_len));
            }
            op = flush_literals(input, ip, lit, output, op);
        }

        tracing::trace!(input = in_len, output = op, "lzf compressed");
        Ok(op)
    }
}

impl Default for Compressor {
    fn default() -> Self {
        Self::new()
    }
}

/// Compress with a fresh [`Compressor`].
pub fn compress(input: &[u8], output: &mut [u8]) -> Result<usize> {
    Compressor::new().compress(input, output)
}

/// Decompress `input` into `output`, returning the number of bytes written.
///
/// `output` must be at least as long as the original data. Corrupt or
/// truncated input is reported as an error, never a panic.
pub fn decompress(input: &[u8], output: &mut [u8]) -> Result<usize> {
    let in_len = input.len();
    let out_len = output.len();
    let mut ip = 0;
    let mut op = 0;

    while ip < in_len {
        let token = ip;
        let ctrl = usize::from(input[ip]);
        ip += 1;

        if ctrl < MAX_LITERAL {
            let run = ctrl + 1;
            if op + run > out_len {
                return Err(output_too_small(op + run, out_len));
            }
            if ip + run > in_len {
                tracing::debug!(position = token, "lzf literal run truncated");
                return Err(CodecError::TruncatedInput { position: token });
            }
            output[op..op + run].copy_from_slice(&input[ip..ip + run]);
            ip += run;
            op += run;
            continue;
        }

        let mut len = ctrl >> 5;
        if len == 7 {
            let extra = *input.get(ip).ok_or(CodecError::TruncatedInput { position: token })?;
            len += usize::from(extra);
            ip += 1;
        }
        let low = *input.get(ip).ok_or(CodecError::TruncatedInput { position: token })?;
        ip += 1;

        let len = len + 2;
        let back = ((ctrl & 0x1f) << 8) + usize::from(low) + 1;
        if op + len > out_len {
            return Err(output_too_small(op + len, out_len));
        }
        let Some(mut reference) = op.checked_sub(back) else {
            tracing::debug!(position = token, back, written = op, "lzf back-reference out of range");
            return Err(CodecError::CorruptReference { position: token });
        };

        // Byte at a time: the source may overlap the bytes being written.
        for _ in 0..len {
            output[op] = output[reference];
            op += 1;
            reference += 1;
        }
    }

    tracing::trace!(input = in_len, output = op, "lzf decompressed");
    Ok(op)
}
