//! DFPWM1a codec
//!
//! One [`Codec`] per audio stream. The state carries across calls, so a
//! stream cut into chunks must go through the same codec value from start
//! to end; a fresh codec per chunk corrupts the adaptive filter.

mod decoder;
mod encoder;
mod predictor;

pub use predictor::Predictor;

use crate::core::{Variant, VariantParams};

/// per-stream encoder/decoder state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Codec {
    variant: Variant,
    pub(crate) predictor: Predictor,
    /// level snapshot for noise shaping
    pub(crate) filtered_last_level: i32,
    /// low-pass accumulator (decode output)
    pub(crate) low_pass_level: i32,
}

impl Codec {
    pub fn new(variant: Variant) -> Self {
        log::debug!("new {variant} dfpwm codec");
        Codec {
            variant,
            predictor: Predictor::new(variant),
            filtered_last_level: 0,
            low_pass_level: 0,
        }
    }

    /// shorthand for `Codec::new(Variant::Legacy)`
    pub fn legacy() -> Self {
        Self::new(Variant::Legacy)
    }

    /// shorthand for `Codec::new(Variant::Modern)`
    pub fn modern() -> Self {
        Self::new(Variant::Modern)
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn params(&self) -> &VariantParams {
        self.predictor.params()
    }

    pub fn predictor(&self) -> &Predictor {
        &self.predictor
    }

    pub fn response(&self) -> i32 {
        self.predictor.response()
    }

    pub fn level(&self) -> i32 {
        self.predictor.level()
    }

    pub fn low_pass_level(&self) -> i32 {
        self.low_pass_level
    }

    /// back to the freshly constructed state, same variant
    pub fn reset(&mut self) {
        *self = Codec::new(self.variant);
    }
}

impl Default for Codec {
    fn default() -> Self {
        Codec::new(Variant::default())
    }
}

/// low-pass output to a pcm sample
///
/// Wraps instead of saturating, consuming decoders expect exactly this.
#[inline]
pub(crate) fn narrow(level: i32) -> i8 {
    level as i8
}
