use super::types::{SAMPLES_PER_BYTE, SAMPLE_RATE};

/// Maximum positive value for 8-bit signed PCM (2^7 - 1)
pub const I8_MAX_F32: f32 = 127.0;

/// Minimum value for 8-bit signed PCM (-2^7)
pub const I8_MIN_F32: f32 = -128.0;

/// Inverse of I8_MAX_F32, used for int→float conversion (1/127)
pub const I8_TO_F32_SCALE: f32 = 1.0 / 127.0;

/// Predictor rail for a 1 bit
pub const LEVEL_HIGH: i32 = 127;

/// Predictor rail for a 0 bit
pub const LEVEL_LOW: i32 = -128;

/// Convert f32 sample (-1.0 to 1.0) to signed 8-bit PCM
#[inline]
pub fn f32_to_i8(sample: f32) -> i8 {
    (sample * I8_MAX_F32).round().clamp(I8_MIN_F32, I8_MAX_F32) as i8
}

/// Convert signed 8-bit PCM to f32
#[inline]
pub fn i8_to_f32(sample: i8) -> f32 {
    sample as f32 * I8_TO_F32_SCALE
}

/// Convert offset-binary (unsigned) 8-bit PCM to signed
#[inline]
pub fn u8_to_i8(sample: u8) -> i8 {
    (sample ^ 0x80) as i8
}

/// Convert signed 8-bit PCM to offset-binary (unsigned)
#[inline]
pub fn i8_to_u8(sample: i8) -> u8 {
    (sample as u8) ^ 0x80
}

/// Keep the high byte of a 16-bit sample
#[inline]
pub fn i16_to_i8(sample: i16) -> i8 {
    (sample >> 8) as i8
}

/// Playback time of an encoded stream of `bytes` length
#[inline]
pub fn bytes_to_duration_secs(bytes: usize) -> f64 {
    (bytes * SAMPLES_PER_BYTE) as f64 / SAMPLE_RATE as f64
}

/// Number of samples covering `secs` at the tape rate
#[inline]
pub fn samples_for_duration(secs: f64) -> usize {
    (secs.max(0.0) * SAMPLE_RATE as f64).round() as usize
}
