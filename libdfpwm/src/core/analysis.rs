//! Signal measurements for checking dfpwm round trips

/// Root mean square of a signed 8-bit signal
pub fn rms(samples: &[i8]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum_sq: f64 = samples.iter().map(|&s| (s as f64) * (s as f64)).sum();
    (sum_sq / samples.len() as f64).sqrt()
}

/// Largest absolute sample value
pub fn peak(samples: &[i8]) -> u8 {
    samples.iter().map(|&s| s.unsigned_abs()).max().unwrap_or(0)
}

/// Arithmetic mean (DC offset)
pub fn mean(samples: &[i8]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    samples.iter().map(|&s| s as f64).sum::<f64>() / samples.len() as f64
}

/// Signal-to-noise ratio in dB of `decoded` against `reference`
///
/// # Returns
/// `None` if the lengths differ or the signals are empty,
/// `f64::INFINITY` when they are identical
pub fn snr_db(reference: &[i8], decoded: &[i8]) -> Option<f64> {
    if reference.is_empty() || reference.len() != decoded.len() {
        return None;
    }

    let mut signal = 0.0f64;
    let mut noise = 0.0f64;
    for (&r, &d) in reference.iter().zip(decoded) {
        let r = r as f64;
        let err = r - d as f64;
        signal += r * r;
        noise += err * err;
    }

    if noise == 0.0 {
        return Some(f64::INFINITY);
    }
    if signal == 0.0 {
        return Some(f64::NEG_INFINITY);
    }
    Some(10.0 * (signal / noise).log10())
}

/// First index from which every sample stays within `tolerance` of `target`
///
/// Returns `None` if the signal never settles.
pub fn settling_index(samples: &[i8], target: i8, tolerance: u8) -> Option<usize> {
    let within = |s: i8| (s as i16 - target as i16).unsigned_abs() <= tolerance as u16;

    // walk back from the end until the first sample outside the band
    let mut idx = samples.len();
    while idx > 0 && within(samples[idx - 1]) {
        idx -= 1;
    }

    if idx == samples.len() {
        None
    } else {
        Some(idx)
    }
}

/// BLAKE3 digest of an encoded stream
pub fn fingerprint(data: &[u8]) -> [u8; 32] {
    *blake3::hash(data).as_bytes()
}

/// BLAKE3 digest as lowercase hex
pub fn fingerprint_hex(data: &[u8]) -> String {
    blake3::hash(data).to_hex().to_string()
}
