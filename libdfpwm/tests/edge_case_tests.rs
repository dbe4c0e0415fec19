//! Edge case and stability tests for the dfpwm codec
use libdfpwm_audio::{Codec, Variant};

// Helper to encode and decode
fn roundtrip(samples: &[i8], variant: Variant) -> Vec<i8> {
    let encoded = Codec::new(variant).compress(samples).expect("Encoding failed");
    Codec::new(variant).decompress(&encoded)
}

// ============================================================================
// Edge Case: Extreme Audio Values
// ============================================================================

#[test]
fn test_max_sample_values() {
    let decoded = roundtrip(&[127; 4096], Variant::Modern);
    for &s in &decoded[512..] {
        assert_eq!(s, 127, "Max sample degraded");
    }
}

#[test]
fn test_min_sample_values() {
    let decoded = roundtrip(&[-128; 4096], Variant::Modern);
    for &s in &decoded[1024..] {
        assert!(s <= -126, "Min sample degraded too much: {}", s);
    }
}

#[test]
fn test_alternating_extremes() {
    let samples: Vec<i8> = (0..4096)
        .map(|i| if i % 2 == 0 { 127 } else { -128 })
        .collect();
    for variant in [Variant::Modern, Variant::Legacy] {
        let decoded = roundtrip(&samples, variant);
        assert_eq!(decoded.len(), samples.len());
    }
}

#[test]
fn test_alternating_bits_hold_response_floor() {
    let mut codec = Codec::modern();
    let samples: Vec<i8> = (0..4096)
        .map(|i| if i % 2 == 0 { 127 } else { -128 })
        .collect();
    for chunk in samples.chunks(64) {
        codec.compress(chunk).unwrap();
        assert!(codec.response() >= 8);
    }
}

#[test]
fn test_top_rail_tie_keeps_encoding_ones() {
    // once the level sits on 127, a 127 sample ties and must stay 1
    let mut codec = Codec::modern();
    let encoded = codec.compress(&[127; 2048]).unwrap();
    assert_eq!(codec.level(), 127);
    assert!(encoded.iter().all(|&b| b == 0xff));
}

#[test]
fn test_bottom_rail_tie_encodes_zero() {
    let mut codec = Codec::modern();
    let encoded = codec.compress(&[-128; 2048]).unwrap();
    assert_eq!(codec.level(), -128);
    assert!(encoded.iter().all(|&b| b == 0x00));
}

// ============================================================================
// Edge Case: Arbitrary Bitstreams
// ============================================================================

#[test]
fn test_every_byte_value_decodes() {
    let data: Vec<u8> = (0..=255u8).cycle().take(4096).collect();
    for variant in [Variant::Modern, Variant::Legacy] {
        let decoded = Codec::new(variant).decompress(&data);
        assert_eq!(decoded.len(), data.len() * 8);
    }
}

#[test]
fn test_decoded_output_stays_in_range_of_low_pass() {
    // the filter never overshoots its input, so wrap-around is never hit
    let data: Vec<u8> = (0..4096u32).map(|i| (i.wrapping_mul(2654435761) >> 24) as u8).collect();
    let mut codec = Codec::legacy();
    for chunk in data.chunks(16) {
        let out = codec.decompress(chunk);
        assert_eq!(*out.last().unwrap() as i32, codec.low_pass_level());
    }
}

#[test]
fn test_single_byte() {
    assert_eq!(roundtrip(&[50; 8], Variant::Modern).len(), 8);
    assert_eq!(Codec::modern().decompress(&[0x0f]).len(), 8);
}
