//! Example: Convert an audio file to DFPWM and back
//!
//! Run with: cargo run --example convert_audio input.wav output.dfpwm

use std::env;
use std::fs;
use tapeconv::{decode_to_wav, encode_from_audio, get_dfpwm_info, ConvertOptions, Variant};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 3 {
        eprintln!("Usage: {} <input-audio> <output-dfpwm>", args[0]);
        std::process::exit(1);
    }

    let input_path = &args[1];
    let output_path = &args[2];

    println!("Reading {}...", input_path);
    let audio_bytes = fs::read(input_path)?;

    println!("\nEncoding to DFPWM1a...");
    let options = ConvertOptions::default().with_variant(Variant::Modern);
    let dfpwm_bytes = encode_from_audio(&audio_bytes, &options)?;

    println!("  Source: {} bytes", audio_bytes.len());
    println!("  Encoded: {} bytes", dfpwm_bytes.len());

    fs::write(output_path, &dfpwm_bytes)?;
    println!("\nWrote DFPWM stream to {}", output_path);

    let info = get_dfpwm_info(&dfpwm_bytes, options.variant);
    println!("\nStream Info:");
    println!("  Samples: {}", info.sample_count);
    println!("  Duration: {}", tapeconv::format_duration(info.duration_secs));
    println!("  BLAKE3: {}", info.fingerprint);

    // Decode back to WAV to listen to the result
    println!("\nDecoding back to WAV for verification...");
    let wav_bytes = decode_to_wav(&dfpwm_bytes, options.variant)?;
    let wav_path = output_path.replace(".dfpwm", "_decoded.wav");
    fs::write(&wav_path, wav_bytes)?;
    println!("Wrote decoded WAV to {}", wav_path);

    Ok(())
}
