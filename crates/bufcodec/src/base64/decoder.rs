use log::debug;

use super::symbol_value;
use crate::{
    buffer::ByteBuffer,
    error::{Error, Result},
};

/// Symbols per decoded group.
const SYMBOLS: u8 = 4;

/// Incremental, permissive base64 decoder.
///
/// Bytes outside the alphabet (whitespace, line breaks, `=` and anything
/// else) are skipped, so wrapped or formatted text decodes transparently.
/// Up to three symbols are carried between calls, packed into an
/// accumulator.
#[derive(Debug, Clone, Default)]
pub struct Base64Decoder {
    bits: u32,
    pending: u8,
}

impl Base64Decoder {
    /// Creates a decoder with no pending symbols.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Symbols held over from previous calls (0 to 3).
    #[must_use]
    pub fn pending_len(&self) -> usize {
        usize::from(self.pending)
    }

    /// Exact number of bytes the next [`Self::decode`] call with `input` and
    /// the same `flush` will write.
    ///
    /// Scans `input` but does not change the decoder.
    #[must_use]
    pub fn decoded_len(&self, input: &[u8], flush: bool) -> usize {
        let symbols = self.pending_len()
            + input
                .iter()
                .filter(|&&byte| symbol_value(byte).is_some())
                .count();
        let whole = symbols / usize::from(SYMBOLS) * 3;
        if flush {
            whole + tail_bytes(symbols % usize::from(SYMBOLS))
        } else {
            whole
        }
    }

    /// Decodes `input` into the front of `dest` and returns the number of
    /// bytes written.
    ///
    /// With `flush` set, a trailing 2- or 3-symbol group is written as 1 or
    /// 2 bytes; a single trailing symbol cannot form a byte and is dropped.
    /// The decoder is reset afterwards.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`] if `dest` is shorter than
    /// [`Self::decoded_len`]. The decoder is unchanged on error.
    pub fn decode(&mut self, input: &[u8], dest: &mut [u8], flush: bool) -> Result<usize> {
        let required = self.decoded_len(input, flush);
        if dest.len() < required {
            return Err(Error::out_of_range("dest", required, dest.len()));
        }
        Ok(self.decode_exact(input, &mut dest[..required], flush))
    }

    /// Decodes `input` and appends the bytes to `out`, writing directly into
    /// its reserved tail.
    ///
    /// # Errors
    ///
    /// Propagates growth failures from `out`.
    pub fn decode_to(&mut self, input: &[u8], out: &mut ByteBuffer, flush: bool) -> Result<usize> {
        let required = self.decoded_len(input, flush);
        let written = self.decode_exact(input, out.reserve_for_write(required)?, flush);
        out.commit_write(written)?;
        Ok(written)
    }

    /// Discards any pending symbols.
    pub fn reset(&mut self) {
        if self.pending != 0 {
            debug!("base64 decoder reset: dropping {} pending symbols", self.pending);
        }
        self.bits = 0;
        self.pending = 0;
    }

    /// `dest` must be exactly [`Self::decoded_len`] bytes long.
    fn decode_exact(&mut self, input: &[u8], dest: &mut [u8], flush: bool) -> usize {
        let mut pos = 0;
        for value in input.iter().filter_map(|&byte| symbol_value(byte)) {
            self.bits = (self.bits << 6) | u32::from(value);
            self.pending += 1;
            if self.pending == SYMBOLS {
                let [_, a, b, c] = self.bits.to_be_bytes();
                dest[pos..pos + 3].copy_from_slice(&[a, b, c]);
                pos += 3;
                self.bits = 0;
                self.pending = 0;
            }
        }

        if flush {
            let tail = self.pending_len();
            match tail {
                2 => {
                    dest[pos] = (self.bits >> 4) as u8;
                    pos += 1;
                }
                3 => {
                    let [_, _, a, b] = (self.bits >> 2).to_be_bytes();
                    dest[pos..pos + 2].copy_from_slice(&[a, b]);
                    pos += 2;
                }
                _ => {}
            }
            debug!("base64 decoder flushed {tail} pending symbols, {pos} bytes out");
            self.bits = 0;
            self.pending = 0;
        }

        debug_assert_eq!(pos, dest.len());
        pos
    }
}

/// Bytes recoverable from a final group of `symbols` (0 to 3) symbols.
#[inline]
fn tail_bytes(symbols: usize) -> usize {
    match symbols {
        2 => 1,
        3 => 2,
        _ => 0,
    }
}
