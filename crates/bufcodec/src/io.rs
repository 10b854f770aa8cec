//! `std::io::Write` adapters that push a byte stream through the codec.
//!
//! ```rust
//! use std::io::Write;
//!
//! use bufcodec::{EncoderOptions, io::EncoderWriter};
//!
//! let mut writer = EncoderWriter::new(Vec::new(), EncoderOptions::default());
//! writer.write_all(b"Ma").unwrap();
//! writer.write_all(b"n!").unwrap();
//! let text = writer.finish().unwrap();
//! assert_eq!(text, b"TWFuIQ==");
//! ```

use std::io::{self, Write};

use log::debug;

use crate::{Base64Decoder, Base64Encoder, ByteBuffer, EncoderOptions};

/// Encodes everything written to it and forwards the base64 text to `W`.
///
/// Call [`EncoderWriter::finish`] to emit the final padded group; dropping
/// the writer without finishing loses up to two pending bytes.
#[derive(Debug)]
pub struct EncoderWriter<W: Write> {
    inner: W,
    encoder: Base64Encoder,
    scratch: ByteBuffer,
}

impl<W: Write> EncoderWriter<W> {
    /// Wraps `inner`.
    pub fn new(inner: W, options: EncoderOptions) -> Self {
        Self {
            inner,
            encoder: Base64Encoder::new(options),
            scratch: ByteBuffer::new(),
        }
    }

    /// Flushes the encoder, writes the remaining text and returns the inner
    /// writer.
    ///
    /// # Errors
    ///
    /// Returns any error from the inner writer.
    pub fn finish(mut self) -> io::Result<W> {
        self.encoder.encode_to(&[], &mut self.scratch, true)?;
        self.drain()?;
        self.inner.flush()?;
        Ok(self.inner)
    }

    /// The wrapped writer.
    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    /// The wrapped writer, mutably. Writing to it directly interleaves with
    /// encoded text that has not been forwarded yet.
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.inner
    }

    fn drain(&mut self) -> io::Result<()> {
        drain_into(&mut self.inner, &mut self.scratch)
    }
}

impl<W: Write> Write for EncoderWriter<W> {
    /// Encodes all of `buf` unless text from an earlier call is still
    /// waiting and the inner writer rejects it, in which case nothing is
    /// consumed. Text that cannot be forwarded after `buf` was consumed is
    /// kept and retried by the next call.
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.drain()?;
        self.encoder.encode_to(buf, &mut self.scratch, false)?;
        if let Err(err) = self.drain() {
            debug!("encoder writer holding {} bytes: {err}", self.scratch.len());
        }
        Ok(buf.len())
    }

    /// Forwards held text and flushes the inner writer. Pending bytes of an
    /// incomplete group stay pending until [`EncoderWriter::finish`].
    fn flush(&mut self) -> io::Result<()> {
        self.drain()?;
        self.inner.flush()
    }
}

/// Decodes base64 text written to it and forwards the bytes to `W`.
#[derive(Debug)]
pub struct DecoderWriter<W: Write> {
    inner: W,
    decoder: Base64Decoder,
    scratch: ByteBuffer,
}

impl<W: Write> DecoderWriter<W> {
    /// Wraps `inner`.
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            decoder: Base64Decoder::new(),
            scratch: ByteBuffer::new(),
        }
    }

    /// Flushes the decoder, writes the remaining bytes and returns the inner
    /// writer.
    ///
    /// # Errors
    ///
    /// Returns any error from the inner writer.
    pub fn finish(mut self) -> io::Result<W> {
        self.decoder.decode_to(&[], &mut self.scratch, true)?;
        self.drain()?;
        self.inner.flush()?;
        Ok(self.inner)
    }

    /// The wrapped writer.
    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    /// The wrapped writer, mutably.
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.inner
    }

    fn drain(&mut self) -> io::Result<()> {
        drain_into(&mut self.inner, &mut self.scratch)
    }
}

impl<W: Write> Write for DecoderWriter<W> {
    /// Same contract as [`EncoderWriter`]'s `write`: an error means none of
    /// `buf` was consumed.
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.drain()?;
        self.decoder.decode_to(buf, &mut self.scratch, false)?;
        if let Err(err) = self.drain() {
            debug!("decoder writer holding {} bytes: {err}", self.scratch.len());
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.drain()?;
        self.inner.flush()
    }
}

/// Writes `scratch` to `inner`, discarding each accepted prefix so a failure
/// part way leaves only the unsent tail behind.
fn drain_into<W: Write>(inner: &mut W, scratch: &mut ByteBuffer) -> io::Result<()> {
    while !scratch.is_empty() {
        match inner.write(scratch.as_slice()) {
            Ok(0) => {
                return Err(io::Error::new(
                    io::ErrorKind::WriteZero,
                    "failed to write buffered output",
                ));
            }
            Ok(n) => scratch.discard_front(n)?,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
            Err(err) => return Err(err),
        }
    }
    Ok(())
}
