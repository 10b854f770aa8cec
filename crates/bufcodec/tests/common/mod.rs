#![allow(dead_code)]

use bufcodec::{Base64Decoder, Base64Encoder, ByteBuffer, EncoderOptions};

pub const PANGRAM: &[u8] = b"The quick brown fox jumps over the lazy dog. ";

// The pangram three times over, cut so that chunk seams land at every
// position inside a 3-byte group and across the 76-column line boundary.
#[rustfmt::skip]
pub const STREAM: [&[u8]; 9] = [
    b"T",                                             // 1 pending byte
    b"he",                                            // completes the first group
    b" quick brown fox jumps over the lazy dog. Th",  // ends with 2 pending bytes
    b"e quick brown",                                 // tops up one group, crosses the first line break
    b"",                                              // empty call leaves state alone
    b" fox jumps over the lazy dog. The q",
    b"uick brown fox jumps over the lazy ",           // crosses the second line break
    b"d",
    b"og. ",                                          // flushed with 0 pending bytes
];

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn pangram_x3() -> Vec<u8> {
    PANGRAM.repeat(3)
}

/// Feed `chunks` through a fresh encoder, flushing on the last one.
pub fn encode_stream(chunks: &[&[u8]], options: EncoderOptions) -> ByteBuffer {
    let mut encoder = Base64Encoder::new(options);
    let mut out = ByteBuffer::new();
    for (i, chunk) in chunks.iter().enumerate() {
        encoder
            .encode_to(chunk, &mut out, i + 1 == chunks.len())
            .expect("encode");
    }
    out
}

pub fn decode_stream(chunks: &[&[u8]]) -> ByteBuffer {
    let mut decoder = Base64Decoder::new();
    let mut out = ByteBuffer::new();
    for (i, chunk) in chunks.iter().enumerate() {
        decoder
            .decode_to(chunk, &mut out, i + 1 == chunks.len())
            .expect("decode");
    }
    out
}

/// Make line breaks visible so snapshots do not depend on CRLF handling.
pub fn show_lines(text: &ByteBuffer) -> String {
    text.as_bstr().to_string().replace("\r\n", "<CRLF>\n")
}

#[test]
fn stream_joins_to_pangrams() {
    assert_eq!(STREAM.concat(), pangram_x3());
}
