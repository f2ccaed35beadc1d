//! WAV file format parameters.

use crate::error::{ToneError, ToneResult};

/// WAV file format parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavFormat {
    /// Number of channels (1 = mono).
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bits per sample.
    pub bits_per_sample: u16,
}

impl WavFormat {
    /// Creates a format from its three scalar inputs.
    pub fn new(channels: u16, sample_rate: u32, bits_per_sample: u16) -> Self {
        Self {
            channels,
            sample_rate,
            bits_per_sample,
        }
    }

    /// Creates a 16-bit mono WAV format.
    pub fn mono(sample_rate: u32) -> Self {
        Self::new(1, sample_rate, 16)
    }

    /// Checks that every field is representable in the header.
    pub fn validate(&self) -> ToneResult<()> {
        if self.channels == 0 {
            return Err(ToneError::invalid_param("channels", "must be at least 1"));
        }
        if self.sample_rate == 0 {
            return Err(ToneError::invalid_param("sample_rate", "must be positive"));
        }
        if self.bits_per_sample == 0 || self.bits_per_sample % 8 != 0 {
            return Err(ToneError::invalid_param(
                "bits_per_sample",
                format!("must be a non-zero multiple of 8, got {}", self.bits_per_sample),
            ));
        }
        if u16::try_from(self.block_align_wide()).is_err() {
            return Err(ToneError::invalid_param(
                "channels",
                "block align does not fit in 16 bits",
            ));
        }
        if u32::try_from(self.byte_rate_wide()).is_err() {
            return Err(ToneError::invalid_param(
                "sample_rate",
                "byte rate does not fit in 32 bits",
            ));
        }
        Ok(())
    }

    /// Bytes per sample (per channel).
    pub fn bytes_per_sample(&self) -> u16 {
        self.bits_per_sample / 8
    }

    /// Block align (bytes per sample frame).
    ///
    /// Truncates if the format has not been validated.
    pub fn block_align(&self) -> u16 {
        self.block_align_wide() as u16
    }

    /// Byte rate (bytes per second).
    ///
    /// Truncates if the format has not been validated.
    pub fn byte_rate(&self) -> u32 {
        self.byte_rate_wide() as u32
    }

    /// Size of the data chunk holding `sample_count` frames, or None on overflow.
    pub fn data_size(&self, sample_count: usize) -> Option<u64> {
        (sample_count as u64)
            .checked_mul(self.channels as u64)?
            .checked_mul(self.bytes_per_sample() as u64)
    }

    fn block_align_wide(&self) -> u64 {
        self.bits_per_sample as u64 * self.channels as u64 / 8
    }

    fn byte_rate_wide(&self) -> u64 {
        self.sample_rate as u64 * self.bits_per_sample as u64 * self.channels as u64 / 8
    }
}
