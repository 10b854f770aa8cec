//! A growable, offset-based buffer and a streaming base64 codec built on it.
//!
//! [`GrowableBuffer`] is a contiguous buffer that appends at the end, removes
//! from the front, and makes room by compacting or doubling. Producers can
//! write straight into its tail with [`GrowableBuffer::reserve_for_write`] and
//! [`GrowableBuffer::commit_write`].
//!
//! [`Base64Encoder`] and [`Base64Decoder`] convert between bytes and base64
//! text in chunks of any size, with exact output-size queries and optional
//! CRLF line wrapping.
//!
//! ```rust
//! use bufcodec::{EncoderOptions, base64};
//!
//! let text = base64::encode(b"Man", EncoderOptions::default()).unwrap();
//! assert_eq!(text, "TWFu");
//! assert_eq!(base64::decode("TW Fu").unwrap(), b"Man");
//! ```

#![no_std]
extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

pub mod base64;
mod buffer;
mod chunk_utils;
mod error;
#[cfg(feature = "std")]
pub mod io;
pub mod mem;
mod options;

#[cfg(test)]
mod tests;

pub use base64::{Base64Decoder, Base64Encoder};
pub use buffer::{ByteBuffer, DEFAULT_CAPACITY, GrowableBuffer};
pub use chunk_utils::{produce_chunks, split_at_cuts};
pub use error::{Error, ErrorKind, Result};
pub use options::{EncoderOptions, MIME_LINE_LENGTH};
