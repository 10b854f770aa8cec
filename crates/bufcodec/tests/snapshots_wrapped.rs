#![allow(missing_docs)]

mod common;

use bufcodec::EncoderOptions;

use crate::common::{STREAM, encode_stream, init_logging, show_lines};

fn render(wrap_column: usize) -> String {
    init_logging();
    show_lines(&encode_stream(&STREAM, EncoderOptions { wrap_column }))
}

#[test]
fn snapshot_unwrapped() {
    insta::assert_snapshot!(render(0), @"VGhlIHF1aWNrIGJyb3duIGZveCBqdW1wcyBvdmVyIHRoZSBsYXp5IGRvZy4gVGhlIHF1aWNrIGJyb3duIGZveCBqdW1wcyBvdmVyIHRoZSBsYXp5IGRvZy4gVGhlIHF1aWNrIGJyb3duIGZveCBqdW1wcyBvdmVyIHRoZSBsYXp5IGRvZy4g");
}

#[test]
fn snapshot_mime_lines() {
    insta::assert_snapshot!(render(76), @r"
    VGhlIHF1aWNrIGJyb3duIGZveCBqdW1wcyBvdmVyIHRoZSBsYXp5IGRvZy4gVGhlIHF1aWNrIGJy<CRLF>
    b3duIGZveCBqdW1wcyBvdmVyIHRoZSBsYXp5IGRvZy4gVGhlIHF1aWNrIGJyb3duIGZveCBqdW1w<CRLF>
    cyBvdmVyIHRoZSBsYXp5IGRvZy4g<CRLF>
    ");
}

#[test]
fn snapshot_pem_lines() {
    insta::assert_snapshot!(render(64), @r"
    VGhlIHF1aWNrIGJyb3duIGZveCBqdW1wcyBvdmVyIHRoZSBsYXp5IGRvZy4gVGhl<CRLF>
    IHF1aWNrIGJyb3duIGZveCBqdW1wcyBvdmVyIHRoZSBsYXp5IGRvZy4gVGhlIHF1<CRLF>
    aWNrIGJyb3duIGZveCBqdW1wcyBvdmVyIHRoZSBsYXp5IGRvZy4g<CRLF>
    ");
}

#[test]
fn snapshot_narrow_lines_split_groups() {
    insta::assert_snapshot!(render(10), @r"
    VGhlIHF1aW<CRLF>
    NrIGJyb3du<CRLF>
    IGZveCBqdW<CRLF>
    1wcyBvdmVy<CRLF>
    IHRoZSBsYX<CRLF>
    p5IGRvZy4g<CRLF>
    VGhlIHF1aW<CRLF>
    NrIGJyb3du<CRLF>
    IGZveCBqdW<CRLF>
    1wcyBvdmVy<CRLF>
    IHRoZSBsYX<CRLF>
    p5IGRvZy4g<CRLF>
    VGhlIHF1aW<CRLF>
    NrIGJyb3du<CRLF>
    IGZveCBqdW<CRLF>
    1wcyBvdmVy<CRLF>
    IHRoZSBsYX<CRLF>
    p5IGRvZy4g<CRLF>
    ");
}
