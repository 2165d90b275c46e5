#![cfg(not(feature = "png"))]

mod common;

use common::kira_05;
use vmrp_stego::{
    decode, decode_bytes, embed_record, encode, is_available, CarrierConfig, ErrorKind,
};

#[test]
fn codec_is_reported_missing() {
    assert!(!is_available());
}

#[test]
fn encode_reports_capability_unavailable_and_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("assets").join("chapter05.png");

    let err = encode(&kira_05(), &out, None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CapabilityUnavailable);
    assert!(!dir.path().join("assets").exists());
}

#[test]
fn decode_reports_capability_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chapter05.png");
    std::fs::write(&path, b"\x89PNG\r\n\x1a\n").unwrap();

    assert_eq!(decode(&path).unwrap_err().kind(), ErrorKind::CapabilityUnavailable);
    assert_eq!(
        decode_bytes(b"\x89PNG\r\n\x1a\n").unwrap_err().kind(),
        ErrorKind::CapabilityUnavailable
    );
}

#[test]
fn in_memory_embedding_still_works() {
    let carrier = embed_record(&kira_05(), None, &CarrierConfig::default()).unwrap();
    assert_eq!(vmrp_stego::decode_carrier(&carrier).unwrap(), kira_05());
}
