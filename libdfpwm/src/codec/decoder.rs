use super::{narrow, Codec};
use crate::core::error::check_range;
use crate::core::{DfpwmError, DfpwmResult, SAMPLES_PER_BYTE};

impl Codec {
    /// decode `byte_count` bytes from `input[in_offset..]` into
    /// `byte_count * 8` samples at `out[out_offset..]`
    ///
    /// # Errors
    /// `OutOfBounds` if either range runs past its buffer. Any byte
    /// sequence is otherwise valid input.
    pub fn decode(
        &mut self,
        out: &mut [i8],
        out_offset: usize,
        input: &[u8],
        in_offset: usize,
        byte_count: usize,
    ) -> DfpwmResult<()> {
        check_range("input", in_offset, byte_count, input.len())?;
        let sample_count =
            byte_count
                .checked_mul(SAMPLES_PER_BYTE)
                .ok_or_else(|| DfpwmError::InvalidArgument {
                    reason: format!("byte count {byte_count} overflows the sample count"),
                })?;
        check_range("output", out_offset, sample_count, out.len())?;

        let src = &input[in_offset..in_offset + byte_count];
        let dest = &mut out[out_offset..out_offset + sample_count];

        for (&byte, group) in src.iter().zip(dest.chunks_exact_mut(SAMPLES_PER_BYTE)) {
            self.decode_byte(byte, group);
        }

        Ok(())
    }

    /// decode a whole stream into a new vec
    pub fn decompress(&mut self, data: &[u8]) -> Vec<i8> {
        let mut out = vec![0i8; data.len() * SAMPLES_PER_BYTE];
        for (&byte, group) in data.iter().zip(out.chunks_exact_mut(SAMPLES_PER_BYTE)) {
            self.decode_byte(byte, group);
        }
        out
    }

    fn decode_byte(&mut self, byte: u8, out: &mut [i8]) {
        let strength = self.predictor.params.lpf_strength;

        for (j, sample) in out.iter_mut().enumerate() {
            let bit = (byte >> j) & 1 != 0;
            let prev_bit = self.predictor.last_bit;
            self.predictor.advance(bit);
            let level = self.predictor.level;

            // noise shaping, average across a transition
            let blevel = if bit == prev_bit {
                level
            } else {
                (self.filtered_last_level + level + 1) >> 1
            };
            self.filtered_last_level = level;

            self.low_pass_level += (strength * (blevel - self.low_pass_level) + 0x80) >> 8;
            *sample = narrow(self.low_pass_level);
        }
    }
}
