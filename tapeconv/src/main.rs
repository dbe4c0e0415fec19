use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use libdfpwm_audio::{f32_to_i8, DEFAULT_MAX_OUTPUT_BYTES, DEFAULT_MAX_TRACK_MINUTES};
use std::fs;
use std::path::{Path, PathBuf};
use tapeconv::{audio, ConvertOptions, InputFormat, Variant};

#[derive(Parser)]
#[command(name = "tapeconv")]
#[command(version)]
#[command(about = "Convert audio to DFPWM for emulated cassette tapes", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Codec revision (modern/1a or legacy)
    #[arg(long, global = true, env = "TAPECONV_VARIANT", default_value_t = Variant::Modern)]
    variant: Variant,
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode an audio file to DFPWM
    Encode {
        /// Input audio file (mp3, wav, flac, ogg, etc.)
        input: PathBuf,
        /// Output file, named after the track title when omitted
        output: Option<PathBuf>,
        /// Use the original DFPWM constants
        #[arg(long)]
        legacy: bool,
        /// Treat the input as headerless 8-bit pcm
        #[arg(long)]
        raw: bool,
        /// Raw input is unsigned (offset binary)
        #[arg(long, requires = "raw")]
        unsigned: bool,
        /// Largest output to produce in bytes
        #[arg(long, env = "TAPECONV_MAX_BYTES", default_value_t = DEFAULT_MAX_OUTPUT_BYTES)]
        max_bytes: usize,
        /// Longest track to accept in minutes
        #[arg(long, env = "TAPECONV_MAX_MINUTES", default_value_t = DEFAULT_MAX_TRACK_MINUTES)]
        max_minutes: u32,
        /// Ignore the size and duration limits
        #[arg(long)]
        no_limit: bool,
    },
    /// Decode DFPWM to WAV (or raw signed 8-bit pcm)
    Decode {
        /// Input DFPWM file
        input: PathBuf,
        /// Output file, `.wav` for WAV and anything else for raw pcm
        output: PathBuf,
        #[arg(long)]
        legacy: bool,
    },
    /// Show information about a DFPWM file
    Info {
        /// Input DFPWM file
        input: PathBuf,
        #[arg(long)]
        legacy: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Round-trip an audio file through the codec and report the quality
    Check {
        /// Input audio file
        input: PathBuf,
        #[arg(long)]
        legacy: bool,
        /// Treat the input as headerless signed 8-bit pcm
        #[arg(long)]
        raw: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    let variant = cli.variant;
    let pick = |legacy: bool| if legacy { Variant::Legacy } else { variant };

    match cli.command {
        Commands::Encode {
            input,
            output,
            legacy,
            raw,
            unsigned,
            max_bytes,
            max_minutes,
            no_limit,
        } => {
            let mut options = if no_limit {
                ConvertOptions::unlimited()
            } else {
                ConvertOptions::default()
                    .with_max_bytes(max_bytes)
                    .with_max_minutes(max_minutes)
            };
            options = options.with_variant(pick(legacy));
            if raw {
                options = options.with_input_format(if unsigned {
                    InputFormat::RawUnsigned
                } else {
                    InputFormat::RawSigned
                });
            }
            encode(&input, output, &options)?;
        }
        Commands::Decode {
            input,
            output,
            legacy,
        } => {
            decode(&input, &output, pick(legacy))?;
        }
        Commands::Info {
            input,
            legacy,
            json,
        } => {
            info(&input, pick(legacy), json)?;
        }
        Commands::Check { input, legacy, raw } => {
            check(&input, pick(legacy), raw)?;
        }
    }

    Ok(())
}

fn encode(input: &Path, output: Option<PathBuf>, options: &ConvertOptions) -> Result<()> {
    println!("Reading {}...", input.display());

    let (dfpwm_data, title) = match options.input_format {
        InputFormat::Auto => {
            let source = audio::read_audio_file(input).context("Failed to read audio file")?;

            println!("  Sample rate: {} Hz", source.sample_rate);
            println!(
                "  Duration: {}",
                tapeconv::format_duration(source.duration_secs())
            );
            if let Some(ref format) = source.metadata.source_format {
                println!("  Format: {}", format);
            }

            println!("Encoding to DFPWM ({})...", options.variant);
            let data =
                tapeconv::encode_from_samples(&source.samples, source.sample_rate, 1, options)
                    .context("Failed to encode audio")?;
            (data, source.metadata.title)
        }
        InputFormat::RawSigned | InputFormat::RawUnsigned => {
            let bytes = fs::read(input).context("Failed to read input file")?;
            println!("Encoding raw pcm to DFPWM ({})...", options.variant);
            let data = tapeconv::encode_from_audio(&bytes, options)
                .context("Failed to encode audio")?;
            (data, None)
        }
    };

    let output = output.unwrap_or_else(|| default_output(input, title.as_deref()));
    fs::write(&output, &dfpwm_data).context("Failed to write output file")?;

    println!("Done!");
    println!("  Output: {}", output.display());
    println!(
        "  Size: {} bytes ({})",
        dfpwm_data.len(),
        tapeconv::format_duration(libdfpwm_audio::bytes_to_duration_secs(dfpwm_data.len()))
    );

    Ok(())
}

fn default_output(input: &Path, title: Option<&str>) -> PathBuf {
    let stem = title
        .map(str::to_string)
        .or_else(|| {
            input
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| "track".to_string());
    input.with_file_name(tapeconv::output_file_name(&stem))
}

fn decode(input: &Path, output: &Path, variant: Variant) -> Result<()> {
    println!("Reading {}...", input.display());

    let dfpwm_data = fs::read(input).context("Failed to read DFPWM file")?;
    let stream = tapeconv::get_dfpwm_info(&dfpwm_data, variant);
    println!(
        "  Duration: {}",
        tapeconv::format_duration(stream.duration_secs)
    );

    println!("Decoding ({})...", variant);

    let is_wav = output
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("wav"));
    let bytes = if is_wav {
        tapeconv::decode_to_wav(&dfpwm_data, variant).context("Failed to decode DFPWM file")?
    } else {
        tapeconv::decode_to_samples(&dfpwm_data, variant)
            .into_iter()
            .map(|s| s as u8)
            .collect()
    };

    fs::write(output, bytes).context("Failed to write output file")?;

    println!("Done!");
    println!("  Output: {}", output.display());

    Ok(())
}

fn info(input: &Path, variant: Variant, json: bool) -> Result<()> {
    let dfpwm_data = fs::read(input).context("Failed to read DFPWM file")?;
    let stream = tapeconv::get_dfpwm_info(&dfpwm_data, variant);

    if json {
        let json_str =
            serde_json::to_string_pretty(&stream).context("Failed to serialize stream info")?;
        println!("{}", json_str);
        return Ok(());
    }

    println!("DFPWM Stream");
    println!("───────────────────────────────");
    println!("  Variant:     {}", stream.variant);
    println!("  Size:        {} bytes", stream.byte_len);
    println!("  Samples:     {}", stream.sample_count);
    println!(
        "  Duration:    {} ({:.2}s)",
        tapeconv::format_duration(stream.duration_secs),
        stream.duration_secs
    );
    println!("  BLAKE3:      {}", stream.fingerprint);

    Ok(())
}

fn check(input: &Path, variant: Variant, raw: bool) -> Result<()> {
    let pcm: Vec<i8> = if raw {
        let bytes = fs::read(input).context("Failed to read input file")?;
        bytes.into_iter().map(|b| b as i8).collect()
    } else {
        let source = audio::read_audio_file(input).context("Failed to read audio file")?;
        source.samples.iter().map(|&s| f32_to_i8(s)).collect()
    };

    if pcm.is_empty() {
        bail!("{} contains no audio", input.display());
    }

    let report = tapeconv::quality_report(&pcm, variant)?;

    println!("Round trip ({})", variant);
    println!("───────────────────────────────");
    match report.snr_db {
        Some(snr) if snr.is_infinite() => println!("  SNR:         lossless"),
        Some(snr) => println!("  SNR:         {:.1} dB", snr),
        None => println!("  SNR:         n/a"),
    }
    println!("  RMS in:      {:.2}", report.rms_in);
    println!("  RMS out:     {:.2}", report.rms_out);
    match report.settle_index {
        Some(index) => println!("  Settles at:  sample {}", index),
        None => println!("  Settles at:  never"),
    }
    println!("  Encoded:     {} bytes", report.encoded_bytes);

    Ok(())
}
