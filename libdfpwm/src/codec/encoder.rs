use super::Codec;
use crate::core::error::check_range;
use crate::core::{DfpwmError, DfpwmResult, SAMPLES_PER_BYTE};

impl Codec {
    /// encode `sample_count` samples from `input[in_offset..]` into
    /// `out[out_offset..]`, one byte per 8 samples
    ///
    /// Bits are packed LSB-first: the earliest sample of a group lands in
    /// bit 0. Nothing is written and the state is untouched if the
    /// arguments are rejected.
    ///
    /// # Errors
    /// * `UnalignedSampleCount` - `sample_count` is not a multiple of 8
    /// * `OutOfBounds` - either range runs past its buffer
    pub fn encode(
        &mut self,
        out: &mut [u8],
        out_offset: usize,
        input: &[i8],
        in_offset: usize,
        sample_count: usize,
    ) -> DfpwmResult<()> {
        if sample_count % SAMPLES_PER_BYTE != 0 {
            return Err(DfpwmError::UnalignedSampleCount {
                count: sample_count,
            });
        }
        let byte_count = sample_count / SAMPLES_PER_BYTE;
        check_range("input", in_offset, sample_count, input.len())?;
        check_range("output", out_offset, byte_count, out.len())?;

        let src = &input[in_offset..in_offset + sample_count];
        let dest = &mut out[out_offset..out_offset + byte_count];

        for (byte, group) in dest.iter_mut().zip(src.chunks_exact(SAMPLES_PER_BYTE)) {
            *byte = self.encode_group(group);
        }

        Ok(())
    }

    /// encode a whole buffer into a new vec
    ///
    /// # Errors
    /// `UnalignedSampleCount` when `samples.len()` is not a multiple of 8
    pub fn compress(&mut self, samples: &[i8]) -> DfpwmResult<Vec<u8>> {
        let mut out = vec![0u8; samples.len() / SAMPLES_PER_BYTE];
        self.encode(&mut out, 0, samples, 0, samples.len())?;
        Ok(out)
    }

    fn encode_group(&mut self, group: &[i8]) -> u8 {
        let mut packed = 0u8;
        for (j, &sample) in group.iter().enumerate() {
            let bit = self.predictor.decide(sample);
            if bit {
                packed |= 1 << j;
            }
            self.predictor.advance(bit);
        }
        packed
    }
}
