//! Generation request and its defaults.

use serde::{Deserialize, Serialize};

use crate::error::{ToneError, ToneResult};
use crate::synth::SineTone;
use crate::wav::{WavFormat, MAX_DATA_SIZE};

/// Default sample rate in Hz.
pub const DEFAULT_SAMPLE_RATE: u32 = 44100;
/// Default bits per sample.
pub const DEFAULT_BITS_PER_SAMPLE: u16 = 16;
/// Default channel count.
pub const DEFAULT_CHANNELS: u16 = 1;
/// Default amplitude: half of 2^15.
pub const DEFAULT_AMPLITUDE: f64 = 16384.0;
/// Default tone frequency in Hz (A4).
pub const DEFAULT_FREQUENCY: f64 = 440.0;
/// Default duration in seconds.
pub const DEFAULT_DURATION_SECONDS: f64 = 10.0;

/// Largest amplitude representable without clipping.
pub const MAX_AMPLITUDE: f64 = i16::MAX as f64;

/// Parameters for one generated tone file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenerationRequest {
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bits per sample. Only 16 is supported.
    pub bits_per_sample: u16,
    /// Channel count. Only mono is supported.
    pub channels: u16,
    /// Peak amplitude in 16-bit sample units.
    pub amplitude: f64,
    /// Tone frequency in Hz.
    pub frequency: f64,
    /// Length in seconds, used when `sample_count` is not set.
    pub duration_seconds: f64,
    /// Explicit number of samples; overrides `duration_seconds`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_count: Option<usize>,
}

impl Default for GenerationRequest {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            bits_per_sample: DEFAULT_BITS_PER_SAMPLE,
            channels: DEFAULT_CHANNELS,
            amplitude: DEFAULT_AMPLITUDE,
            frequency: DEFAULT_FREQUENCY,
            duration_seconds: DEFAULT_DURATION_SECONDS,
            sample_count: None,
        }
    }
}

impl GenerationRequest {
    /// Sets an explicit sample count.
    pub fn with_sample_count(mut self, sample_count: usize) -> Self {
        self.sample_count = Some(sample_count);
        self
    }

    /// Sets the duration and clears any explicit sample count.
    pub fn with_duration(mut self, duration_seconds: f64) -> Self {
        self.duration_seconds = duration_seconds;
        self.sample_count = None;
        self
    }

    /// Checks every field, returning the first invalid one.
    pub fn validate(&self) -> ToneResult<()> {
        if self.sample_rate == 0 {
            return Err(ToneError::invalid_param("sample_rate", "must be positive"));
        }
        if self.channels != 1 {
            return Err(ToneError::invalid_param(
                "channels",
                format!("only mono output is supported, got {}", self.channels),
            ));
        }
        if self.bits_per_sample != 16 {
            return Err(ToneError::invalid_param(
                "bits_per_sample",
                format!("only 16-bit PCM is supported, got {}", self.bits_per_sample),
            ));
        }
        if !self.frequency.is_finite() || self.frequency <= 0.0 {
            return Err(ToneError::invalid_param(
                "frequency",
                format!("must be a positive number of Hz, got {}", self.frequency),
            ));
        }
        if !self.amplitude.is_finite() || !(0.0..=MAX_AMPLITUDE).contains(&self.amplitude) {
            return Err(ToneError::invalid_param(
                "amplitude",
                format!("must be between 0 and {}, got {}", MAX_AMPLITUDE, self.amplitude),
            ));
        }
        if self.sample_count.is_none()
            && (!self.duration_seconds.is_finite() || self.duration_seconds < 0.0)
        {
            return Err(ToneError::invalid_param(
                "duration_seconds",
                format!("must be zero or more seconds, got {}", self.duration_seconds),
            ));
        }
        if self.sample_count.is_none() {
            let max_frames = (MAX_DATA_SIZE / self.format().block_align() as u32) as f64;
            let frames = (self.duration_seconds * self.sample_rate as f64).round();
            if frames > max_frames {
                return Err(ToneError::invalid_param(
                    "duration_seconds",
                    format!(
                        "{} seconds at {} Hz is {} frames, more than a WAV file can hold ({})",
                        self.duration_seconds, self.sample_rate, frames, max_frames
                    ),
                ));
            }
        }
        Ok(())
    }

    /// Number of samples to render.
    pub fn resolved_sample_count(&self) -> usize {
        match self.sample_count {
            Some(count) => count,
            None => (self.duration_seconds * self.sample_rate as f64).round() as usize,
        }
    }

    /// Container format for this request.
    pub fn format(&self) -> WavFormat {
        WavFormat::new(self.channels, self.sample_rate, self.bits_per_sample)
    }

    /// Tone to synthesize.
    pub fn tone(&self) -> SineTone {
        SineTone::new(self.amplitude, self.frequency)
    }
}
