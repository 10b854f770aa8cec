//! Benchmark – `bufcodec` streaming base64 over a `ByteBuffer`
#![allow(missing_docs)]

use std::time::Duration;

use bufcodec::{
    Base64Decoder, Base64Encoder, ByteBuffer, EncoderOptions, produce_chunks,
};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

/// Deterministic pseudo-random bytes so every run encodes the same payload.
fn make_payload(len: usize) -> Vec<u8> {
    let mut state = 0x2545_F491_u32;
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            state.to_le_bytes()[0]
        })
        .collect()
}

/// Encode `payload` in `parts` chunks, reusing one output buffer that is
/// drained after every call, the way a socket writer would use it.
fn run_encoder(payload: &[u8], parts: usize, options: EncoderOptions, out: &mut ByteBuffer) -> usize {
    let mut encoder = Base64Encoder::new(options);
    let chunks = produce_chunks(payload, parts);
    let mut produced = 0;
    for (i, chunk) in chunks.iter().enumerate() {
        produced += encoder
            .encode_to(chunk, out, i + 1 == chunks.len())
            .expect("encode");
        out.clear();
    }
    produced
}

fn run_decoder(text: &[u8], parts: usize, out: &mut ByteBuffer) -> usize {
    let mut decoder = Base64Decoder::new();
    let chunks = produce_chunks(text, parts);
    let mut produced = 0;
    for (i, chunk) in chunks.iter().enumerate() {
        produced += decoder
            .decode_to(chunk, out, i + 1 == chunks.len())
            .expect("decode");
        out.clear();
    }
    produced
}

fn bench_streaming_codec(c: &mut Criterion) {
    let payload = make_payload(64 * 1024);
    let mime_text = bufcodec::base64::encode(&payload, EncoderOptions::mime()).expect("encode");

    let mut group = c.benchmark_group("base64_encode_split");
    group.throughput(Throughput::Bytes(payload.len() as u64));
    for &parts in &[1usize, 100, 10_000] {
        for (name, options) in [("plain", EncoderOptions::default()), ("mime", EncoderOptions::mime())] {
            let mut out = ByteBuffer::new();
            group.bench_with_input(BenchmarkId::new(parts.to_string(), name), &options, |b, &o| {
                b.iter(|| black_box(run_encoder(black_box(&payload), parts, o, &mut out)));
            });
        }
    }
    group.finish();

    let mut group = c.benchmark_group("base64_decode_split");
    group.throughput(Throughput::Bytes(mime_text.len() as u64));
    for &parts in &[1usize, 100, 10_000] {
        let mut out = ByteBuffer::new();
        group.bench_function(BenchmarkId::new(parts.to_string(), "mime"), |b| {
            b.iter(|| black_box(run_decoder(black_box(mime_text.as_bytes()), parts, &mut out)));
        });
    }
    group.finish();
}

fn criterion() -> Criterion {
    let mut c = Criterion::default();
    if cfg!(feature = "test-fast") {
        c = c
            .warm_up_time(Duration::from_millis(10))
            .measurement_time(Duration::from_millis(100))
            .sample_size(10);
    } else {
        c = c
            .warm_up_time(Duration::from_secs(3))
            .measurement_time(Duration::from_secs(5));
    }
    c
}

criterion_group! { name = benches; config = criterion(); targets = bench_streaming_codec }
criterion_main!(benches);
