//! Variant, sample conversion and stream info tests

use libdfpwm_audio::{
    bytes_to_duration_secs, f32_to_i8, i16_to_i8, i8_to_f32, i8_to_u8, samples_for_duration,
    stream_info, u8_to_i8, StreamInfo, Variant,
};

// ============================================================================
// Variant
// ============================================================================

#[test]
fn test_default_variant_is_modern() {
    assert_eq!(Variant::default(), Variant::Modern);
}

#[test]
fn test_variant_from_legacy_flag() {
    assert_eq!(Variant::from(true), Variant::Legacy);
    assert_eq!(Variant::from(false), Variant::Modern);
}

#[test]
fn test_variant_parse() {
    assert_eq!("legacy".parse::<Variant>().unwrap(), Variant::Legacy);
    assert_eq!("OLD".parse::<Variant>().unwrap(), Variant::Legacy);
    assert_eq!(" modern ".parse::<Variant>().unwrap(), Variant::Modern);
    assert_eq!("1a".parse::<Variant>().unwrap(), Variant::Modern);

    let err = "dfpwm2".parse::<Variant>().unwrap_err();
    assert!(err.is_invalid_argument());
}

#[test]
fn test_variant_display_roundtrips_through_parse() {
    for v in [Variant::Legacy, Variant::Modern] {
        assert_eq!(v.to_string().parse::<Variant>().unwrap(), v);
    }
}

#[test]
fn test_variant_serde_names() {
    assert_eq!(serde_json::to_string(&Variant::Legacy).unwrap(), "\"legacy\"");
    let v: Variant = serde_json::from_str("\"modern\"").unwrap();
    assert_eq!(v, Variant::Modern);
}

// ============================================================================
// Sample Conversion
// ============================================================================

#[test]
fn test_f32_to_i8_scales_and_clamps() {
    assert_eq!(f32_to_i8(0.0), 0);
    assert_eq!(f32_to_i8(1.0), 127);
    assert_eq!(f32_to_i8(-1.0), -127);
    assert_eq!(f32_to_i8(2.0), 127);
    assert_eq!(f32_to_i8(-2.0), -128);
    assert_eq!(f32_to_i8(0.5), 64);
}

#[test]
fn test_i8_to_f32() {
    assert_eq!(i8_to_f32(0), 0.0);
    assert!((i8_to_f32(127) - 1.0).abs() < 1e-6);
    assert!((i8_to_f32(-127) + 1.0).abs() < 1e-6);
}

#[test]
fn test_unsigned_conversion() {
    assert_eq!(u8_to_i8(128), 0);
    assert_eq!(u8_to_i8(0), -128);
    assert_eq!(u8_to_i8(255), 127);
    for s in i8::MIN..=i8::MAX {
        assert_eq!(u8_to_i8(i8_to_u8(s)), s);
    }
}

#[test]
fn test_i16_keeps_high_byte() {
    assert_eq!(i16_to_i8(0x7fff), 127);
    assert_eq!(i16_to_i8(i16::MIN), -128);
    assert_eq!(i16_to_i8(0x00ff), 0);
    assert_eq!(i16_to_i8(-1), -1);
}

// ============================================================================
// Durations
// ============================================================================

#[test]
fn test_durations() {
    assert_eq!(bytes_to_duration_secs(6000), 1.0);
    assert_eq!(samples_for_duration(1.5), 72_000);
    assert_eq!(samples_for_duration(-1.0), 0);
}

#[test]
fn test_stream_info() {
    let data = vec![0x55u8; 12_000];
    let info = StreamInfo::from_stream(&data, Variant::Legacy);

    assert_eq!(info.variant, Variant::Legacy);
    assert_eq!(info.byte_len, 12_000);
    assert_eq!(info.sample_count, 96_000);
    assert_eq!(info.duration_secs, 2.0);
    assert_eq!(info.fingerprint.len(), 64);
    assert_eq!(stream_info(&data, Variant::Legacy), info);
}
