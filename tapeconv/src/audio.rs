use anyhow::{bail, Context, Result};
use libdfpwm_audio::{i8_to_u8, SAMPLE_RATE};
use std::io::{Cursor, Write};
use std::path::Path;
use symphonia::core::audio::{AudioBufferRef, Signal};
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::{MetadataOptions, StandardTagKey, Value};
use symphonia::core::probe::Hint;

/// Metadata extracted from audio file
#[derive(Debug, Default, Clone)]
pub struct AudioMetadata {
    pub title: Option<String>,
    pub artist: Option<String>,
    // Source format (e.g., "MP3", "FLAC", "WAV")
    pub source_format: Option<String>,
}

/// Decoded source audio
#[derive(Debug, Clone)]
pub struct SourceAudio {
    /// Mono f32 samples in range [-1.0, 1.0]
    pub samples: Vec<f32>,
    pub sample_rate: u32,
    pub metadata: AudioMetadata,
}

impl SourceAudio {
    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }
}

/// Read an audio file from disk
pub fn read_audio_file(path: &Path) -> Result<SourceAudio> {
    let file = std::fs::File::open(path).context("Failed to open audio file")?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());
    read_from_source(mss, path.extension().and_then(|e| e.to_str()))
}

/// Read audio from bytes (for cross-platform/WASM support)
pub fn read_audio_from_bytes(bytes: &[u8]) -> Result<SourceAudio> {
    let cursor = Cursor::new(bytes.to_vec());
    let mss = MediaSourceStream::new(Box::new(cursor), Default::default());
    read_from_source(mss, None)
}

fn read_from_source(mss: MediaSourceStream, extension: Option<&str>) -> Result<SourceAudio> {
    // Create hint from file extension
    let mut hint = Hint::new();
    if let Some(ext) = extension {
        hint.with_extension(ext);
    }

    let mut probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .context("Unsupported audio format")?;

    let mut metadata = AudioMetadata {
        source_format: extension.map(|ext| ext.to_uppercase()),
        ..Default::default()
    };

    if let Some(meta_rev) = probed.metadata.get() {
        if let Some(current) = meta_rev.current() {
            extract_metadata_tags(current, &mut metadata);
        }
    }

    let mut format = probed.format;

    if let Some(meta_rev) = format.metadata().current() {
        extract_metadata_tags(meta_rev, &mut metadata);
    }

    // Find the first audio track
    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .context("No audio track found")?;

    if metadata.source_format.is_none() {
        metadata.source_format = Some(codec_name(track.codec_params.codec).to_string());
    }

    let track_id = track.id;
    let sample_rate = track
        .codec_params
        .sample_rate
        .context("Unknown sample rate")?;
    let channels = track
        .codec_params
        .channels
        .context("Unknown channel count")?
        .count();

    // the tape format is mono and has no mixdown stage
    if channels != 1 {
        bail!(
            "Input has {} channels, only mono audio can be written to tape",
            channels
        );
    }

    if sample_rate != SAMPLE_RATE {
        log::warn!(
            "input is {} Hz, tapes play at {} Hz and the audio will not be resampled",
            sample_rate,
            SAMPLE_RATE
        );
    }

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .context("Failed to create decoder")?;

    let mut samples = Vec::new();

    // Decode all packets
    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(symphonia::core::errors::Error::IoError(e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break
            }
            Err(e) => return Err(e).context("Error reading packet"),
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(decoded) => decoded,
            Err(symphonia::core::errors::Error::DecodeError(e)) => {
                log::debug!("skipping undecodable packet: {}", e);
                continue;
            }
            Err(e) => return Err(e).context("Error decoding packet"),
        };

        append_samples(&decoded, &mut samples);
    }

    log::debug!(
        "decoded {} samples at {} Hz from {}",
        samples.len(),
        sample_rate,
        metadata.source_format.as_deref().unwrap_or("unknown source")
    );

    Ok(SourceAudio {
        samples,
        sample_rate,
        metadata,
    })
}

fn codec_name(codec: symphonia::core::codecs::CodecType) -> &'static str {
    use symphonia::core::codecs::*;
    match codec {
        CODEC_TYPE_FLAC => "FLAC",
        CODEC_TYPE_PCM_U8
        | CODEC_TYPE_PCM_S8
        | CODEC_TYPE_PCM_S16LE
        | CODEC_TYPE_PCM_S16BE
        | CODEC_TYPE_PCM_S24LE
        | CODEC_TYPE_PCM_S32LE
        | CODEC_TYPE_PCM_F32LE => "WAV",
        CODEC_TYPE_MP3 => "MP3",
        CODEC_TYPE_VORBIS => "OGG",
        CODEC_TYPE_AAC => "AAC",
        _ => "UNKNOWN",
    }
}

fn extract_metadata_tags(
    meta: &symphonia::core::meta::MetadataRevision,
    metadata: &mut AudioMetadata,
) {
    for tag in meta.tags() {
        let value = match &tag.value {
            Value::String(s) => s.clone(),
            _ => continue,
        };
        match tag.std_key {
            Some(StandardTagKey::TrackTitle) => metadata.title = Some(value),
            Some(StandardTagKey::Artist) => metadata.artist = Some(value),
            _ => {}
        }
    }
}

fn append_samples(buffer: &AudioBufferRef, samples: &mut Vec<f32>) {
    match buffer {
        AudioBufferRef::F32(buf) => samples.extend_from_slice(buf.chan(0)),
        AudioBufferRef::F64(buf) => samples.extend(buf.chan(0).iter().map(|&s| s as f32)),
        AudioBufferRef::S8(buf) => samples.extend(buf.chan(0).iter().map(|&s| s as f32 / 128.0)),
        AudioBufferRef::U8(buf) => {
            samples.extend(buf.chan(0).iter().map(|&s| (s as f32 - 128.0) / 128.0))
        }
        AudioBufferRef::S16(buf) => {
            let scale = 1.0 / 32768.0;
            samples.extend(buf.chan(0).iter().map(|&s| s as f32 * scale))
        }
        AudioBufferRef::S24(buf) => {
            let scale = 1.0 / 8388608.0;
            samples.extend(buf.chan(0).iter().map(|s| s.inner() as f32 * scale))
        }
        AudioBufferRef::S32(buf) => {
            let scale = 1.0 / 2147483648.0;
            samples.extend(buf.chan(0).iter().map(|&s| s as f32 * scale))
        }
        _ => {
            log::warn!("unsupported sample format in decoded buffer, skipping");
        }
    }
}

/// Write 8-bit pcm to a WAV file
pub fn write_wav(path: &Path, samples: &[i8]) -> Result<()> {
    let bytes = write_wav_to_bytes(samples)?;
    std::fs::write(path, bytes).context("Failed to write WAV file")
}

/// Write mono 8-bit pcm as an unsigned 8-bit WAV in memory
pub fn write_wav_to_bytes(samples: &[i8]) -> Result<Vec<u8>> {
    let mut buffer = Vec::with_capacity(44 + samples.len());

    let data_size = samples.len();
    let file_size = 36 + data_size; // 44 byte header - 8 + data_size
    let channels: u16 = 1;
    let bytes_per_sample: u16 = 1;

    // RIFF header
    buffer.write_all(b"RIFF")?;
    buffer.write_all(&(file_size as u32).to_le_bytes())?;
    buffer.write_all(b"WAVE")?;

    // fmt chunk
    buffer.write_all(b"fmt ")?;
    buffer.write_all(&16u32.to_le_bytes())?; // chunk size
    buffer.write_all(&1u16.to_le_bytes())?; // format = PCM
    buffer.write_all(&channels.to_le_bytes())?;
    buffer.write_all(&SAMPLE_RATE.to_le_bytes())?;
    let byte_rate = SAMPLE_RATE * (channels * bytes_per_sample) as u32;
    buffer.write_all(&byte_rate.to_le_bytes())?;
    buffer.write_all(&(channels * bytes_per_sample).to_le_bytes())?; // block align
    buffer.write_all(&8u16.to_le_bytes())?; // bits per sample

    // data chunk
    buffer.write_all(b"data")?;
    buffer.write_all(&(data_size as u32).to_le_bytes())?;

    // 8-bit WAV is offset binary
    buffer.extend(samples.iter().map(|&s| i8_to_u8(s)));

    // RIFF chunks are word aligned
    if data_size % 2 == 1 {
        buffer.push(0);
    }

    Ok(buffer)
}
