#![allow(missing_docs)]

mod common;

use std::io::{self, Read, Write};

use bufcodec::{
    ByteBuffer, EncoderOptions,
    io::{DecoderWriter, EncoderWriter},
};

use crate::common::{STREAM, init_logging, pangram_x3};

#[test]
fn encoder_writer_streams_wrapped_text() {
    init_logging();
    let mut writer = EncoderWriter::new(Vec::new(), EncoderOptions::mime());
    for chunk in STREAM {
        writer.write_all(chunk).unwrap();
    }
    let text = writer.finish().unwrap();
    let expected = bufcodec::base64::encode(&pangram_x3(), EncoderOptions::mime()).unwrap();
    assert_eq!(text, expected.as_bytes());
}

#[test]
fn decoder_writer_inverts_encoder_writer() {
    let mut encoder = EncoderWriter::new(Vec::new(), EncoderOptions { wrap_column: 10 });
    encoder.write_all(&pangram_x3()).unwrap();
    let text = encoder.finish().unwrap();

    let mut decoder = DecoderWriter::new(Vec::new());
    for byte in &text {
        decoder.write_all(std::slice::from_ref(byte)).unwrap();
    }
    assert_eq!(decoder.finish().unwrap(), pangram_x3());
}

#[test]
fn byte_buffer_reads_and_writes() {
    let mut buf = ByteBuffer::with_capacity(4);
    buf.write_all(b"hello, world").unwrap();
    let mut head = [0u8; 5];
    buf.read_exact(&mut head).unwrap();
    assert_eq!(&head, b"hello");
    let mut rest = String::new();
    buf.read_to_string(&mut rest).unwrap();
    assert_eq!(rest, ", world");
    assert!(buf.is_empty());
    assert_eq!(buf.offset(), 0);
}

/// Accepts at most `max_chunk` bytes per call and fails the next call with
/// `WouldBlock` while `fail_next` is set.
#[derive(Debug, Default)]
struct FlakySink {
    out: Vec<u8>,
    max_chunk: usize,
    fail_next: bool,
}

impl FlakySink {
    fn new(max_chunk: usize) -> Self {
        Self {
            max_chunk,
            fail_next: true,
            ..Self::default()
        }
    }
}

impl Write for FlakySink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if std::mem::take(&mut self.fail_next) {
            return Err(io::ErrorKind::WouldBlock.into());
        }
        let n = buf.len().min(self.max_chunk);
        self.out.extend_from_slice(&buf[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn encoder_writer_keeps_text_the_sink_refused() {
    let mut writer = EncoderWriter::new(FlakySink::new(64), EncoderOptions::default());
    assert_eq!(writer.write(b"Man").unwrap(), 3);
    assert!(writer.get_ref().out.is_empty());
    assert_eq!(writer.finish().unwrap().out, b"TWFu");
}

#[test]
fn encoder_writer_retry_after_error_encodes_once() {
    let mut writer = EncoderWriter::new(FlakySink::new(3), EncoderOptions::default());
    writer.write_all(b"Man").unwrap();

    // "TWFu" is held after the first refusal; a second refusal while it is
    // still held must consume nothing.
    writer.get_mut().fail_next = true;
    let err = writer.write(b"Man").unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::WouldBlock);

    writer.write_all(b"Man").unwrap();
    assert_eq!(writer.finish().unwrap().out, b"TWFuTWFu");
}

#[test]
fn encoder_writer_flush_forwards_held_text() {
    let mut writer = EncoderWriter::new(FlakySink::new(1), EncoderOptions::default());
    writer.write_all(b"hello").unwrap();
    writer.flush().unwrap();
    // The trailing "lo" stays pending until finish.
    assert_eq!(writer.get_ref().out, b"aGVs");
    assert_eq!(writer.finish().unwrap().out, b"aGVsbG8=");
}

#[test]
fn decoder_writer_retry_after_error_decodes_once() {
    let mut writer = DecoderWriter::new(FlakySink::new(2));
    writer.write_all(b"TWFu").unwrap();

    writer.get_mut().fail_next = true;
    assert!(writer.write(b"TWFu").is_err());

    writer.write_all(b"TWFu").unwrap();
    assert_eq!(writer.finish().unwrap().out, b"ManMan");
}
