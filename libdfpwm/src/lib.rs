//! DFPWM1a encoder/decoder
//!
//! Converts signed 8-bit PCM to the 1-bit delta modulated stream played by
//! emulated cassette tapes, and back.
//!
//! ```
//! use libdfpwm_audio::{Codec, Variant};
//!
//! let samples = vec![64i8; 4800];
//! let mut encoder = Codec::new(Variant::Modern);
//! let encoded = encoder.compress(&samples).unwrap();
//! assert_eq!(encoded.len(), 600);
//!
//! let mut decoder = Codec::new(Variant::Modern);
//! let decoded = decoder.decompress(&encoded);
//! assert_eq!(decoded.len(), samples.len());
//! ```

use wasm_bindgen::prelude::*;

pub mod codec;
pub mod core;
pub mod streaming;

pub use codec::{Codec, Predictor};
pub use core::{
    analysis, bytes_to_duration_secs, f32_to_i8, fingerprint, fingerprint_hex, i16_to_i8,
    i8_to_f32, i8_to_u8, samples_for_duration, stream_info, u8_to_i8, DfpwmError, DfpwmResult,
    StreamInfo, Variant, VariantParams, DEFAULT_MAX_OUTPUT_BYTES, DEFAULT_MAX_TRACK_MINUTES,
    SAMPLES_PER_BYTE, SAMPLE_RATE,
};
pub use streaming::{StreamingDecoder, StreamingEncoder};

/// turn an error into js
fn to_js_err(e: DfpwmError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

// api functions

/// encode signed 8-bit pcm to dfpwm
///
/// # Arguments
/// * `samples` - Mono samples at 48 kHz, length a multiple of 8
/// * `legacy` - Use the original DFPWM constants instead of DFPWM1a
///
/// # Returns
/// One byte per 8 samples
#[wasm_bindgen]
pub fn encode(samples: &[i8], legacy: bool) -> Result<Vec<u8>, JsValue> {
    Codec::new(Variant::from(legacy))
        .compress(samples)
        .map_err(to_js_err)
}

/// encode float samples (-1.0 to 1.0), padding the tail with silence
#[wasm_bindgen]
pub fn encode_f32(samples: &[f32], legacy: bool) -> Result<Vec<u8>, JsValue> {
    let pcm: Vec<i8> = samples.iter().map(|&s| f32_to_i8(s)).collect();
    let mut encoder = StreamingEncoder::new(Variant::from(legacy));
    encoder.push_samples(&pcm).map_err(to_js_err)?;
    encoder.finalize().map_err(to_js_err)
}

/// decode dfpwm to signed 8-bit pcm
#[wasm_bindgen]
pub fn decode(data: &[u8], legacy: bool) -> Vec<i8> {
    Codec::new(Variant::from(legacy)).decompress(data)
}

/// decode dfpwm to float samples (-1.0 to 1.0)
#[wasm_bindgen]
pub fn decode_f32(data: &[u8], legacy: bool) -> Vec<f32> {
    decode(data, legacy).into_iter().map(i8_to_f32).collect()
}

/// info about a dfpwm stream
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct AudioInfo {
    /// Encoded size in bytes
    pub byte_len: usize,
    /// Decoded sample count
    pub sample_count: u64,
    /// Duration in seconds at 48 kHz
    pub duration_secs: f64,
    #[wasm_bindgen(skip)]
    pub fingerprint: String,
}

#[wasm_bindgen]
impl AudioInfo {
    /// BLAKE3 of the stream as hex
    #[wasm_bindgen(getter)]
    pub fn fingerprint(&self) -> String {
        self.fingerprint.clone()
    }
}

impl From<StreamInfo> for AudioInfo {
    fn from(info: StreamInfo) -> Self {
        AudioInfo {
            byte_len: info.byte_len,
            sample_count: info.sample_count,
            duration_secs: info.duration_secs,
            fingerprint: info.fingerprint,
        }
    }
}

/// Get information about a dfpwm stream
#[wasm_bindgen]
pub fn info(data: &[u8]) -> AudioInfo {
    StreamInfo::from_stream(data, Variant::Modern).into()
}

/// Get information about a dfpwm stream as a plain js object
#[wasm_bindgen]
pub fn info_object(data: &[u8], legacy: bool) -> Result<JsValue, JsValue> {
    let info = StreamInfo::from_stream(data, Variant::from(legacy));
    serde_wasm_bindgen::to_value(&info).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// crate version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
