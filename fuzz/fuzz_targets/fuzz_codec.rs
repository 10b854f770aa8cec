#![no_main]

use arbitrary::Arbitrary;
use bufcodec::{
    Base64Decoder, Base64Encoder, ByteBuffer, EncoderOptions, split_at_cuts,
};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input<'a> {
    data: &'a [u8],
    /// Cut points for the plain bytes.
    encode_cuts: Vec<u16>,
    /// Cut points for the encoded text.
    decode_cuts: Vec<u16>,
    wrap_column: u8,
    /// Small starting capacity so growth and compaction both happen.
    out_capacity: u8,
}

fn to_cuts(cuts: &[u16]) -> Vec<usize> {
    cuts.iter().map(|&c| usize::from(c)).collect()
}

fuzz_target!(|input: Input<'_>| {
    let options = EncoderOptions {
        wrap_column: usize::from(input.wrap_column),
    };

    // One-shot reference.
    let mut encoder = Base64Encoder::new(options);
    let mut whole = ByteBuffer::new();
    encoder.encode_to(input.data, &mut whole, true).unwrap();

    // Chunked, draining half of the output after every call so the buffer
    // shifts its offset around.
    let mut encoder = Base64Encoder::new(options);
    let mut out = ByteBuffer::with_capacity(usize::from(input.out_capacity));
    let mut text = Vec::new();
    let chunks = split_at_cuts(input.data, &to_cuts(&input.encode_cuts));
    for (i, chunk) in chunks.iter().enumerate() {
        let flush = i + 1 == chunks.len();
        let predicted = encoder.encoded_len(chunk.len(), flush).unwrap();
        assert_eq!(encoder.encode_to(chunk, &mut out, flush).unwrap(), predicted);
        let drain = out.len() / 2;
        let mut head = vec![0u8; drain];
        out.remove_front_into(drain, &mut head, 0).unwrap();
        text.extend_from_slice(&head);
    }
    if chunks.is_empty() {
        encoder.encode_to(&[], &mut out, true).unwrap();
    }
    text.extend_from_slice(out.as_slice());
    assert_eq!(text.as_slice(), whole.as_slice());
    assert_eq!(encoder.pending_len(), 0);

    let mut decoder = Base64Decoder::new();
    let mut plain = ByteBuffer::with_capacity(usize::from(input.out_capacity));
    let chunks = split_at_cuts(&text, &to_cuts(&input.decode_cuts));
    for (i, chunk) in chunks.iter().enumerate() {
        let flush = i + 1 == chunks.len();
        let predicted = decoder.decoded_len(chunk, flush);
        assert_eq!(decoder.decode_to(chunk, &mut plain, flush).unwrap(), predicted);
    }
    assert_eq!(plain.as_slice(), input.data);

    // Arbitrary bytes must never panic the decoder.
    let mut decoder = Base64Decoder::new();
    let mut sink = ByteBuffer::new();
    decoder.decode_to(input.data, &mut sink, true).unwrap();
});
