use crate::core::{Variant, VariantParams, LEVEL_HIGH, LEVEL_LOW};

/// adaptive predictor shared by the encode and decode paths
///
/// Every bit of a stream must pass through [`Predictor::advance`] exactly
/// once and in order, the next transition depends on the exact post-state
/// of the previous one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predictor {
    pub(crate) params: VariantParams,
    /// step-size driver, `0..=2^respPrec - 1`
    pub(crate) response: i32,
    /// current predicted sample
    pub(crate) level: i32,
    /// previous bit
    pub(crate) last_bit: bool,
}

impl Predictor {
    pub fn new(variant: Variant) -> Self {
        Predictor {
            params: variant.params(),
            response: 0,
            level: 0,
            last_bit: false,
        }
    }

    pub fn response(&self) -> i32 {
        self.response
    }

    pub fn level(&self) -> i32 {
        self.level
    }

    pub fn last_bit(&self) -> bool {
        self.last_bit
    }

    pub fn params(&self) -> &VariantParams {
        &self.params
    }

    /// bit the encoder emits for `sample` at the current level
    ///
    /// Ties go to 1 only on the top rail, every other tie goes to 0.
    #[inline]
    pub fn decide(&self, sample: i8) -> bool {
        let sample = sample as i32;
        sample > self.level || (sample == self.level && self.level == LEVEL_HIGH)
    }

    /// apply one bit to the predictor state
    #[inline]
    pub fn advance(&mut self, bit: bool) {
        let p = &self.params;

        // level chases the rail for this bit, rounded to nearest
        let target = if bit { LEVEL_HIGH } else { LEVEL_LOW };
        let mut nlevel =
            self.level + ((self.response * (target - self.level) + p.rounding_bias()) >> p.resp_prec);
        if nlevel == self.level && self.level != target {
            nlevel += if bit { 1 } else { -1 };
        }

        let continuing = bit == self.last_bit;
        let (rtarget, rdelta) = if continuing {
            (p.response_max(), p.resp_inc)
        } else {
            (0, p.resp_dec)
        };

        let mut nresponse = self.response;
        if p.scaled_response {
            nresponse += (rdelta * (rtarget - self.response) + 128) >> 8;
        }
        if nresponse == self.response && self.response != rtarget {
            nresponse += if continuing { 1 } else { -1 };
        }

        if let Some(floor) = p.response_floor() {
            if nresponse < floor {
                nresponse = floor;
            }
        }

        self.response = nresponse;
        self.level = nlevel;
        self.last_bit = bit;
    }
}
