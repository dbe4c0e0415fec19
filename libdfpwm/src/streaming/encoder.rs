use crate::codec::Codec;
use crate::core::{DfpwmError, DfpwmResult, Variant, SAMPLES_PER_BYTE};

/// incremental encoder for sample streams of any chunk size
///
/// The codec needs whole bytes, so up to 7 trailing samples of a push
/// are held back until the next push or [`StreamingEncoder::flush`].
pub struct StreamingEncoder {
    codec: Codec,
    /// samples not yet filling a byte
    remainder: Vec<i8>,
    /// encoded bytes not yet taken
    output: Vec<u8>,
    /// bytes produced over the stream lifetime
    bytes_written: usize,
    total_samples: u64,
    max_bytes: Option<usize>,
}

impl StreamingEncoder {
    /// Create a new streaming encoder
    pub fn new(variant: Variant) -> Self {
        Self {
            codec: Codec::new(variant),
            remainder: Vec::with_capacity(SAMPLES_PER_BYTE),
            output: Vec::new(),
            bytes_written: 0,
            total_samples: 0,
            max_bytes: None,
        }
    }

    /// Refuse to grow the stream past `limit` bytes
    pub fn with_max_bytes(mut self, limit: usize) -> Self {
        self.max_bytes = Some(limit);
        self
    }

    pub fn variant(&self) -> Variant {
        self.codec.variant()
    }

    /// Samples waiting for a full byte
    pub fn pending_samples(&self) -> usize {
        self.remainder.len()
    }

    /// Bytes ready to take
    pub fn pending_bytes(&self) -> usize {
        self.output.len()
    }

    /// Bytes produced so far, taken or not
    pub fn bytes_written(&self) -> usize {
        self.bytes_written
    }

    /// Samples pushed so far, including held-back ones
    pub fn total_samples(&self) -> u64 {
        self.total_samples
    }

    /// Push samples to the encoder
    ///
    /// # Errors
    /// `LimitExceeded` if the push would take the stream past its bound.
    /// The push is then dropped whole.
    pub fn push_samples(&mut self, samples: &[i8]) -> DfpwmResult<()> {
        let available = self.remainder.len() + samples.len();
        let whole = available / SAMPLES_PER_BYTE;
        self.check_limit(whole)?;

        self.total_samples += samples.len() as u64;

        // top up the held-back byte first
        let mut rest = samples;
        if !self.remainder.is_empty() {
            let need = (SAMPLES_PER_BYTE - self.remainder.len()).min(rest.len());
            self.remainder.extend_from_slice(&rest[..need]);
            rest = &rest[need..];
            if self.remainder.len() == SAMPLES_PER_BYTE {
                let group = std::mem::take(&mut self.remainder);
                self.encode_aligned(&group)?;
            }
        }

        let aligned = rest.len() - rest.len() % SAMPLES_PER_BYTE;
        if aligned > 0 {
            self.encode_aligned(&rest[..aligned])?;
        }
        self.remainder.extend_from_slice(&rest[aligned..]);

        Ok(())
    }

    /// Take every encoded byte produced so far
    pub fn take_output(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.output)
    }

    /// Pad held-back samples with silence and encode them
    ///
    /// # Errors
    /// `LimitExceeded` if the padded byte would cross the bound
    pub fn flush(&mut self) -> DfpwmResult<()> {
        if self.remainder.is_empty() {
            return Ok(());
        }
        self.check_limit(1)?;

        let mut group = std::mem::take(&mut self.remainder);
        log::debug!("padding {} trailing samples with silence", SAMPLES_PER_BYTE - group.len());
        group.resize(SAMPLES_PER_BYTE, 0);
        self.encode_aligned(&group)
    }

    /// Flush and return all untaken output
    pub fn finalize(mut self) -> DfpwmResult<Vec<u8>> {
        self.flush()?;
        log::debug!(
            "streaming encode finished: {} samples, {} bytes",
            self.total_samples,
            self.bytes_written
        );
        Ok(self.output)
    }

    // ========================================================================
    // Internal methods
    // ========================================================================

    fn check_limit(&self, new_bytes: usize) -> DfpwmResult<()> {
        if let Some(limit) = self.max_bytes {
            if self.bytes_written + new_bytes > limit {
                log::warn!(
                    "stream at {} bytes, {} more would exceed limit of {}",
                    self.bytes_written,
                    new_bytes,
                    limit
                );
                return Err(DfpwmError::LimitExceeded { limit });
            }
        }
        Ok(())
    }

    fn encode_aligned(&mut self, samples: &[i8]) -> DfpwmResult<()> {
        let start = self.output.len();
        let bytes = samples.len() / SAMPLES_PER_BYTE;
        self.output.resize(start + bytes, 0);
        self.codec
            .encode(&mut self.output, start, samples, 0, samples.len())?;
        self.bytes_written += bytes;
        Ok(())
    }
}
