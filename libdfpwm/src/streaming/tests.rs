//! Internal streaming tests

use super::*;
use crate::core::{DfpwmError, Variant};
use crate::Codec;

fn ramp(len: usize) -> Vec<i8> {
    (0..len).map(|i| ((i * 7) % 256) as u8 as i8).collect()
}

#[test]
fn test_streaming_matches_one_shot() {
    let samples = ramp(1000);

    let expected = Codec::modern().compress(&samples).unwrap();

    let mut encoder = StreamingEncoder::new(Variant::Modern);
    for chunk in samples.chunks(13) {
        encoder.push_samples(chunk).unwrap();
    }
    assert_eq!(encoder.pending_samples(), 0);
    let encoded = encoder.finalize().unwrap();

    assert_eq!(encoded, expected);
}

#[test]
fn test_streaming_holds_back_remainder() {
    let mut encoder = StreamingEncoder::new(Variant::Modern);
    encoder.push_samples(&ramp(11)).unwrap();

    assert_eq!(encoder.pending_bytes(), 1);
    assert_eq!(encoder.pending_samples(), 3);
    assert_eq!(encoder.total_samples(), 11);

    let first = encoder.take_output();
    assert_eq!(first.len(), 1);
    assert_eq!(encoder.pending_bytes(), 0);
    assert_eq!(encoder.bytes_written(), 1);
}

#[test]
fn test_flush_pads_with_silence() {
    let samples = ramp(11);

    let mut padded = samples.clone();
    padded.resize(16, 0);
    let expected = Codec::legacy().compress(&padded).unwrap();

    let mut encoder = StreamingEncoder::new(Variant::Legacy);
    encoder.push_samples(&samples).unwrap();
    encoder.flush().unwrap();

    assert_eq!(encoder.pending_samples(), 0);
    assert_eq!(encoder.take_output(), expected);
}

#[test]
fn test_limit_rejects_whole_push() {
    let mut encoder = StreamingEncoder::new(Variant::Modern).with_max_bytes(4);
    encoder.push_samples(&ramp(24)).unwrap();

    let err = encoder.push_samples(&ramp(16)).unwrap_err();
    assert_eq!(err, DfpwmError::LimitExceeded { limit: 4 });
    assert_eq!(encoder.bytes_written(), 3);
    assert_eq!(encoder.total_samples(), 24);

    // still room for one more byte
    encoder.push_samples(&ramp(8)).unwrap();
    assert_eq!(encoder.bytes_written(), 4);
}

#[test]
fn test_limit_applies_to_flush() {
    let mut encoder = StreamingEncoder::new(Variant::Modern).with_max_bytes(1);
    encoder.push_samples(&ramp(12)).unwrap();
    assert!(matches!(
        encoder.flush(),
        Err(DfpwmError::LimitExceeded { limit: 1 })
    ));
}

#[test]
fn test_streaming_decoder_matches_one_shot() {
    let data: Vec<u8> = (0..64u8).map(|b| b.wrapping_mul(37)).collect();
    let expected = Codec::modern().decompress(&data);

    let mut decoder = StreamingDecoder::new(Variant::Modern);
    let mut decoded = Vec::new();
    for chunk in data.chunks(5) {
        decoded.extend(decoder.feed(chunk));
    }

    assert_eq!(decoded, expected);
    assert_eq!(decoder.samples_decoded(), 512);
}

#[test]
fn test_feed_into_stops_at_buffer_size() {
    let data = [0xffu8; 4];
    let mut out = [0i8; 20];

    let mut decoder = StreamingDecoder::new(Variant::Modern);
    assert_eq!(decoder.feed_into(&data, &mut out), 16);
    assert_eq!(&out[16..], &[0i8; 4]);
}
