//! tapeconv - audio to DFPWM converter library
//!
//! Turns ordinary audio files into DFPWM streams for emulated cassette
//! tapes, and decodes them back for listening. Works on native targets and
//! can be compiled to WebAssembly.
//!

pub mod audio;

#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
pub mod wasm;

use anyhow::{bail, Context, Result};
use libdfpwm_audio::analysis::{rms, settling_index, snr_db};
use libdfpwm_audio::{
    f32_to_i8, u8_to_i8, Codec, StreamingDecoder, StreamingEncoder, DEFAULT_MAX_OUTPUT_BYTES,
    DEFAULT_MAX_TRACK_MINUTES, SAMPLE_RATE,
};

/// Re-export libdfpwm types
pub use libdfpwm_audio::{StreamInfo, Variant};

/// samples handed to the streaming encoder per push
const PUSH_CHUNK: usize = 4096;

/// How raw (headerless) input bytes are interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputFormat {
    /// Probe the container with symphonia
    #[default]
    Auto,
    /// Headerless signed 8-bit pcm
    RawSigned,
    /// Headerless unsigned (offset binary) 8-bit pcm
    RawUnsigned,
}

/// Conversion options for producing a DFPWM stream
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertOptions {
    /// Codec revision to encode with
    pub variant: Variant,
    /// Largest stream to produce, `None` for no bound
    pub max_bytes: Option<usize>,
    /// Longest input to accept, `None` for no bound
    pub max_duration_secs: Option<f64>,
    pub input_format: InputFormat,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            variant: Variant::Modern,
            max_bytes: Some(DEFAULT_MAX_OUTPUT_BYTES),
            max_duration_secs: Some(DEFAULT_MAX_TRACK_MINUTES as f64 * 60.0),
            input_format: InputFormat::Auto,
        }
    }
}

impl ConvertOptions {
    /// Options without any size or duration bound
    pub fn unlimited() -> Self {
        Self {
            max_bytes: None,
            max_duration_secs: None,
            ..Default::default()
        }
    }

    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    /// Bound the encoded stream size
    pub fn with_max_bytes(mut self, max_bytes: usize) -> Self {
        self.max_bytes = Some(max_bytes);
        self
    }

    /// Bound the input duration
    pub fn with_max_minutes(mut self, minutes: u32) -> Self {
        self.max_duration_secs = Some(minutes as f64 * 60.0);
        self
    }

    pub fn with_input_format(mut self, input_format: InputFormat) -> Self {
        self.input_format = input_format;
        self
    }

    fn check_duration(&self, duration_secs: f64) -> Result<()> {
        if let Some(max) = self.max_duration_secs {
            if duration_secs > max {
                bail!(
                    "Cannot convert tracks longer than {} (input is {})",
                    format_duration(max),
                    format_duration(duration_secs)
                );
            }
        }
        Ok(())
    }
}

/// Encode audio file bytes to DFPWM
///
/// # Arguments
/// * `audio_bytes` - Raw bytes of an audio file (MP3, WAV, FLAC, OGG, etc.),
///   or headerless 8-bit pcm when `options.input_format` says so
/// * `options` - Conversion options
///
/// # Returns
/// Raw bytes of the DFPWM stream
pub fn encode_from_audio(audio_bytes: &[u8], options: &ConvertOptions) -> Result<Vec<u8>> {
    match options.input_format {
        InputFormat::Auto => {
            let source =
                audio::read_audio_from_bytes(audio_bytes).context("Failed to read audio file")?;
            encode_from_samples(&source.samples, source.sample_rate, 1, options)
        }
        InputFormat::RawSigned => {
            let pcm: Vec<i8> = audio_bytes.iter().map(|&b| b as i8).collect();
            encode_from_pcm(&pcm, options)
        }
        InputFormat::RawUnsigned => {
            let pcm: Vec<i8> = audio_bytes.iter().map(|&b| u8_to_i8(b)).collect();
            encode_from_pcm(&pcm, options)
        }
    }
}

/// Encode float samples to DFPWM
///
/// # Arguments
/// * `samples` - Mono f32 samples in range [-1.0, 1.0]
/// * `sample_rate` - Sample rate in Hz, should be 48 kHz
/// * `channels` - Number of channels, must be 1
/// * `options` - Conversion options
pub fn encode_from_samples(
    samples: &[f32],
    sample_rate: u32,
    channels: usize,
    options: &ConvertOptions,
) -> Result<Vec<u8>> {
    if channels != 1 {
        bail!("Expected mono input, got {} channels", channels);
    }
    if sample_rate == 0 {
        bail!("Invalid sample rate 0");
    }
    if sample_rate != SAMPLE_RATE {
        log::warn!(
            "encoding {} Hz audio as {} Hz, playback speed will be off",
            sample_rate,
            SAMPLE_RATE
        );
    }
    options.check_duration(samples.len() as f64 / sample_rate as f64)?;

    let pcm: Vec<i8> = samples.iter().map(|&s| f32_to_i8(s)).collect();
    encode_stream(&pcm, options)
}

/// Encode signed 8-bit pcm at 48 kHz to DFPWM
///
/// A trailing partial byte is padded with silence.
pub fn encode_from_pcm(pcm: &[i8], options: &ConvertOptions) -> Result<Vec<u8>> {
    options.check_duration(pcm.len() as f64 / SAMPLE_RATE as f64)?;
    encode_stream(pcm, options)
}

fn encode_stream(pcm: &[i8], options: &ConvertOptions) -> Result<Vec<u8>> {
    let mut encoder = StreamingEncoder::new(options.variant);
    if let Some(limit) = options.max_bytes {
        encoder = encoder.with_max_bytes(limit);
    }

    for chunk in pcm.chunks(PUSH_CHUNK) {
        encoder.push_samples(chunk).context("Encoding failed")?;
    }
    let encoded = encoder.finalize().context("Encoding failed")?;

    log::info!(
        "Conversion completed, size: {} bytes ({})",
        encoded.len(),
        options.variant
    );
    Ok(encoded)
}

/// Decode a DFPWM stream to signed 8-bit pcm
pub fn decode_to_samples(dfpwm: &[u8], variant: Variant) -> Vec<i8> {
    let mut decoder = StreamingDecoder::new(variant);
    decoder.feed(dfpwm)
}

/// Decode a DFPWM stream to an 8-bit mono 48 kHz WAV file
///
/// # Returns
/// Raw bytes of a WAV file
pub fn decode_to_wav(dfpwm: &[u8], variant: Variant) -> Result<Vec<u8>> {
    let samples = decode_to_samples(dfpwm, variant);
    audio::write_wav_to_bytes(&samples).context("Failed to write WAV data")
}

/// Get information about a DFPWM stream
pub fn get_dfpwm_info(data: &[u8], variant: Variant) -> StreamInfo {
    libdfpwm_audio::stream_info(data, variant)
}

/// How well a signal survives a round trip through the codec
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct QualityReport {
    pub variant: Variant,
    /// `None` for empty input
    pub snr_db: Option<f64>,
    pub rms_in: f64,
    pub rms_out: f64,
    /// Index after which the output stays within 4 of the last input sample
    pub settle_index: Option<usize>,
    pub encoded_bytes: usize,
}

/// Encode then decode `pcm` and compare it with the result
///
/// `pcm` is truncated to a whole number of bytes.
pub fn quality_report(pcm: &[i8], variant: Variant) -> Result<QualityReport> {
    let aligned = &pcm[..pcm.len() - pcm.len() % libdfpwm_audio::SAMPLES_PER_BYTE];

    let encoded = Codec::new(variant)
        .compress(aligned)
        .context("Encoding failed")?;
    let decoded = Codec::new(variant).decompress(&encoded);

    let settle_index = aligned
        .last()
        .and_then(|&target| settling_index(&decoded, target, 4));

    Ok(QualityReport {
        variant,
        snr_db: snr_db(aligned, &decoded),
        rms_in: rms(aligned),
        rms_out: rms(&decoded),
        settle_index,
        encoded_bytes: encoded.len(),
    })
}

/// File name for a converted track
///
/// Question marks, asterisks and whitespace become underscores.
pub fn output_file_name(title: &str) -> String {
    let stem: String = title
        .chars()
        .map(|c| {
            if c == '?' || c == '*' || c.is_whitespace() {
                '_'
            } else {
                c
            }
        })
        .collect();
    format!("{}.dfpwm", stem)
}

/// Format a duration as `MM:SS`, or `HH:MM:SS` from one hour up
pub fn format_duration(secs: f64) -> String {
    let total = if secs.is_finite() && secs > 0.0 {
        secs as u64
    } else {
        0
    };
    let hours = total / 3600;
    let mins = (total / 60) % 60;
    let secs = total % 60;
    if hours != 0 {
        format!("{:02}:{:02}:{:02}", hours, mins, secs)
    } else {
        format!("{:02}:{:02}", mins, secs)
    }
}
