//! Streaming base64 (RFC 4648, standard alphabet, `=` padding).
//!
//! [`Base64Encoder`] and [`Base64Decoder`] accept input in arbitrary chunks
//! and keep incomplete groups (up to 2 raw bytes, or up to 3 symbols)
//! between calls. Every call returns all output derivable from the input
//! seen so far; passing `flush = true` resolves the pending group and
//! resets the codec.
//!
//! Output sizes are exact and can be queried before encoding with
//! [`Base64Encoder::encoded_len`] and [`Base64Decoder::decoded_len`], so a
//! destination can be sized once.
//!
//! ```rust
//! use bufcodec::{Base64Decoder, Base64Encoder, ByteBuffer, EncoderOptions};
//!
//! let mut encoder = Base64Encoder::new(EncoderOptions::default());
//! let mut text = ByteBuffer::new();
//! encoder.encode_to(b"Ma", &mut text, false).unwrap();
//! encoder.encode_to(b"n", &mut text, true).unwrap();
//! assert_eq!(text.as_bstr(), "TWFu");
//!
//! let mut decoder = Base64Decoder::new();
//! let mut bytes = ByteBuffer::new();
//! decoder.decode_to(b"TW\r\nFu", &mut bytes, true).unwrap();
//! assert_eq!(bytes.as_slice(), b"Man");
//! ```

mod decoder;
mod encoder;

use alloc::{string::String, vec::Vec};

pub use decoder::Base64Decoder;
pub use encoder::Base64Encoder;

use crate::{EncoderOptions, buffer::ByteBuffer, error::Result};

/// The 64 symbols, indexed by their 6-bit value.
pub const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

/// Padding character.
pub const PAD: u8 = b'=';

const INVALID: u8 = 0xFF;

/// Maps a byte to its 6-bit value, or [`INVALID`] for bytes outside the
/// alphabet.
const DECODE_TABLE: [u8; 256] = {
    let mut table = [INVALID; 256];
    let mut i = 0;
    while i < ALPHABET.len() {
        table[ALPHABET[i] as usize] = i as u8;
        i += 1;
    }
    table
};

#[inline]
fn symbol_value(byte: u8) -> Option<u8> {
    match DECODE_TABLE[byte as usize] {
        INVALID => None,
        v => Some(v),
    }
}

/// Encodes `input` in one call.
///
/// # Errors
///
/// [`Error::InvalidArgument`](crate::Error::InvalidArgument) if the output
/// size does not fit in `usize`.
pub fn encode(input: &[u8], options: EncoderOptions) -> Result<String> {
    let mut encoder = Base64Encoder::new(options);
    let mut out = ByteBuffer::with_capacity(encoder.encoded_len(input.len(), true)?);
    encoder.encode_to(input, &mut out, true)?;
    Ok(out.iter().copied().map(char::from).collect())
}

/// Decodes `input` in one call, skipping bytes outside the alphabet.
///
/// # Errors
///
/// Propagates buffer growth failures; never fails for well-sized input.
pub fn decode(input: impl AsRef<[u8]>) -> Result<Vec<u8>> {
    let input = input.as_ref();
    let mut decoder = Base64Decoder::new();
    let mut out = ByteBuffer::with_capacity(decoder.decoded_len(input, true));
    decoder.decode_to(input, &mut out, true)?;
    Ok(out.to_vec())
}
