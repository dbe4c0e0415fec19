use wasm_bindgen::prelude::*;

use crate::{ConvertOptions, Variant};

fn to_js_err(e: anyhow::Error) -> JsValue {
    JsValue::from_str(&format!("{:#}", e))
}

/// Install the panic hook so panics show up in the browser console
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Convert an audio file (mp3, wav, flac, ogg, ...) to DFPWM
///
/// `max_bytes` of 0 disables the output bound.
#[wasm_bindgen]
pub fn encode_audio_to_dfpwm(
    audio_bytes: &[u8],
    legacy: bool,
    max_bytes: usize,
) -> Result<Vec<u8>, JsValue> {
    let mut options = ConvertOptions::default().with_variant(Variant::from(legacy));
    options.max_bytes = (max_bytes > 0).then_some(max_bytes);

    crate::encode_from_audio(audio_bytes, &options).map_err(to_js_err)
}

/// Decode DFPWM to an 8-bit mono WAV file for playback
#[wasm_bindgen]
pub fn decode_dfpwm_to_wav(dfpwm_bytes: &[u8], legacy: bool) -> Result<Vec<u8>, JsValue> {
    crate::decode_to_wav(dfpwm_bytes, Variant::from(legacy)).map_err(to_js_err)
}

/// Attachment name for a track title
#[wasm_bindgen]
pub fn dfpwm_file_name(title: &str) -> String {
    crate::output_file_name(title)
}
