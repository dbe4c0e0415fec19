use crate::codec::Codec;
use crate::core::{Variant, SAMPLES_PER_BYTE};

/// incremental decoder over one persistent codec
pub struct StreamingDecoder {
    codec: Codec,
    samples_decoded: u64,
}

impl StreamingDecoder {
    pub fn new(variant: Variant) -> Self {
        Self {
            codec: Codec::new(variant),
            samples_decoded: 0,
        }
    }

    pub fn variant(&self) -> Variant {
        self.codec.variant()
    }

    /// samples produced so far
    pub fn samples_decoded(&self) -> u64 {
        self.samples_decoded
    }

    /// decode the next piece of the stream
    pub fn feed(&mut self, data: &[u8]) -> Vec<i8> {
        let out = self.codec.decompress(data);
        self.samples_decoded += out.len() as u64;
        out
    }

    /// decode into a caller buffer, returns samples written
    ///
    /// Decodes as many whole bytes of `data` as fit in `out`.
    pub fn feed_into(&mut self, data: &[u8], out: &mut [i8]) -> usize {
        let bytes = data.len().min(out.len() / SAMPLES_PER_BYTE);
        // both ranges are in bounds by construction
        if self.codec.decode(out, 0, data, 0, bytes).is_err() {
            return 0;
        }
        let written = bytes * SAMPLES_PER_BYTE;
        self.samples_decoded += written as u64;
        written
    }
}
