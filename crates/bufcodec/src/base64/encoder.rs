use log::debug;

use super::{ALPHABET, PAD};
use crate::{
    EncoderOptions,
    buffer::ByteBuffer,
    error::{Error, Result},
};

/// Raw bytes per encoded group.
const GROUP: usize = 3;
/// Characters per encoded group.
const SYMBOLS: usize = 4;
const CRLF: &[u8; 2] = b"\r\n";

/// Incremental base64 encoder.
///
/// Holds at most two raw bytes between calls, plus the current output column
/// when line wrapping is enabled.
#[derive(Debug, Clone)]
pub struct Base64Encoder {
    options: EncoderOptions,
    pending: ByteBuffer,
    column: usize,
}

impl Base64Encoder {
    /// Creates an encoder with no pending input.
    #[must_use]
    pub fn new(options: EncoderOptions) -> Self {
        Self {
            options,
            pending: ByteBuffer::with_capacity(GROUP),
            column: 0,
        }
    }

    /// The options this encoder was created with.
    #[must_use]
    pub fn options(&self) -> EncoderOptions {
        self.options
    }

    /// Raw bytes held over from previous calls (0, 1 or 2).
    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Characters emitted since the last line break. Always 0 when wrapping
    /// is disabled.
    #[must_use]
    pub fn column(&self) -> usize {
        self.column
    }

    /// Exact number of bytes the next [`Self::encode`] call with an input of
    /// `input_len` bytes and the same `flush` will write, padding and line
    /// breaks included.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if the size does not fit in `usize`.
    pub fn encoded_len(&self, input_len: usize, flush: bool) -> Result<usize> {
        let overflow = || Error::overflow("input_len");
        let total = self
            .pending
            .len()
            .checked_add(input_len)
            .ok_or_else(overflow)?;
        let mut groups = total / GROUP;
        if flush && total % GROUP != 0 {
            groups += 1;
        }
        let symbols = groups.checked_mul(SYMBOLS).ok_or_else(overflow)?;
        if !self.options.wraps() {
            return Ok(symbols);
        }

        let wrap = self.options.wrap_column;
        let reach = self.column.checked_add(symbols).ok_or_else(overflow)?;
        let mut breaks = reach / wrap;
        if flush && reach % wrap != 0 {
            breaks += 1;
        }
        breaks
            .checked_mul(CRLF.len())
            .and_then(|crlf| symbols.checked_add(crlf))
            .ok_or_else(overflow)
    }

    /// Encodes `input` into the front of `dest` and returns the number of
    /// bytes written.
    ///
    /// Trailing bytes that do not complete a group are kept for the next
    /// call, unless `flush` is set, in which case they are written with `=`
    /// padding, a partial line is terminated, and the encoder is reset.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`] if `dest` is shorter than
    /// [`Self::encoded_len`]. The encoder is unchanged on error.
    pub fn encode(&mut self, input: &[u8], dest: &mut [u8], flush: bool) -> Result<usize> {
        let required = self.encoded_len(input.len(), flush)?;
        if dest.len() < required {
            return Err(Error::out_of_range("dest", required, dest.len()));
        }
        self.encode_exact(input, &mut dest[..required], flush)
    }

    /// Encodes `input` and appends the output to `out`, writing directly into
    /// its reserved tail.
    ///
    /// # Errors
    ///
    /// Propagates growth failures from `out`.
    pub fn encode_to(&mut self, input: &[u8], out: &mut ByteBuffer, flush: bool) -> Result<usize> {
        let required = self.encoded_len(input.len(), flush)?;
        let written = self.encode_exact(input, out.reserve_for_write(required)?, flush)?;
        out.commit_write(written)?;
        Ok(written)
    }

    /// Discards any pending bytes and the line position.
    pub fn reset(&mut self) {
        if !self.pending.is_empty() || self.column != 0 {
            debug!(
                "base64 encoder reset: dropping {} pending bytes at column {}",
                self.pending.len(),
                self.column
            );
        }
        self.pending.clear();
        self.column = 0;
    }

    /// `dest` must be exactly [`Self::encoded_len`] bytes long.
    fn encode_exact(&mut self, mut input: &[u8], dest: &mut [u8], flush: bool) -> Result<usize> {
        let mut out = LineWriter {
            dest,
            pos: 0,
            column: self.column,
            wrap: self.options.wrap_column,
        };
        let mut group = [0u8; GROUP];

        if !self.pending.is_empty() {
            let (head, rest) = input.split_at((GROUP - self.pending.len()).min(input.len()));
            self.pending.append_slice(head)?;
            input = rest;
            if self.pending.len() == GROUP {
                self.pending.remove_front_into(GROUP, &mut group, 0)?;
                out.put_group(&group);
            }
        }

        let mut groups = input.chunks_exact(GROUP);
        for chunk in &mut groups {
            out.put_group(chunk);
        }
        self.pending.append_slice(groups.remainder())?;

        if flush {
            let tail = self.pending.len();
            if tail != 0 {
                self.pending.remove_front_into(tail, &mut group, 0)?;
                out.put_padded(&group[..tail]);
            }
            out.finish_line();
            debug!("base64 encoder flushed {tail} pending bytes, {} bytes out", out.pos);
        }

        self.column = out.column;
        debug_assert_eq!(out.pos, out.dest.len());
        Ok(out.pos)
    }
}

/// Writes symbols into a pre-sized slice, inserting CRLF at the wrap column.
struct LineWriter<'a> {
    dest: &'a mut [u8],
    pos: usize,
    column: usize,
    wrap: usize,
}

impl LineWriter<'_> {
    #[inline]
    fn put(&mut self, symbol: u8) {
        self.dest[self.pos] = symbol;
        self.pos += 1;
        if self.wrap != 0 {
            self.column += 1;
            if self.column == self.wrap {
                self.newline();
            }
        }
    }

    #[inline]
    fn newline(&mut self) {
        self.dest[self.pos..self.pos + CRLF.len()].copy_from_slice(CRLF);
        self.pos += CRLF.len();
        self.column = 0;
    }

    #[inline]
    fn put_sextet(&mut self, bits: u32, shift: u32) {
        self.put(ALPHABET[((bits >> shift) & 0x3F) as usize]);
    }

    #[inline]
    fn put_group(&mut self, group: &[u8]) {
        let bits = (u32::from(group[0]) << 16) | (u32::from(group[1]) << 8) | u32::from(group[2]);
        for shift in [18, 12, 6, 0] {
            self.put_sextet(bits, shift);
        }
    }

    /// `tail` holds 1 or 2 bytes.
    fn put_padded(&mut self, tail: &[u8]) {
        let second = tail.get(1).copied().unwrap_or(0);
        let bits = (u32::from(tail[0]) << 16) | (u32::from(second) << 8);
        self.put_sextet(bits, 18);
        self.put_sextet(bits, 12);
        if tail.len() == 2 {
            self.put_sextet(bits, 6);
        } else {
            self.put(PAD);
        }
        self.put(PAD);
    }

    fn finish_line(&mut self) {
        if self.column != 0 {
            self.newline();
        }
    }
}
