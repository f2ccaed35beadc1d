//! Sine tone synthesis.
//!
//! Each sample's phase is computed directly from its index, `t = i / sample_rate`,
//! so long renders never drift from the requested pitch.

use std::f64::consts::PI;

use crate::buffer::SampleBuffer;
use crate::error::ToneResult;

/// 2 * PI
pub const TWO_PI: f64 = 2.0 * PI;

/// A constant-amplitude, constant-frequency sine tone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SineTone {
    /// Peak amplitude in 16-bit sample units.
    pub amplitude: f64,
    /// Frequency in Hz.
    pub frequency: f64,
}

impl SineTone {
    /// Creates a new sine tone.
    pub fn new(amplitude: f64, frequency: f64) -> Self {
        Self {
            amplitude,
            frequency,
        }
    }

    /// Renders `sample_count` samples at `sample_rate`.
    pub fn render(&self, sample_rate: u32, sample_count: usize) -> ToneResult<SampleBuffer> {
        let mut buffer = SampleBuffer::zeroed(sample_count)?;

        for (i, sample) in buffer.as_mut_slice().iter_mut().enumerate() {
            *sample = sine_sample(self.amplitude, self.frequency, sample_rate, i);
        }

        Ok(buffer)
    }
}

/// Computes sample `index` of a sine tone.
///
/// The value is rounded to the nearest integer and clamped to the `i16` range.
pub fn sine_sample(amplitude: f64, frequency: f64, sample_rate: u32, index: usize) -> i16 {
    let t = index as f64 / sample_rate as f64;
    let value = amplitude * (TWO_PI * frequency * t).sin();
    to_i16(value)
}

/// Rounds and saturates a sample value to 16 bits.
fn to_i16(value: f64) -> i16 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(i16::MIN as f64, i16::MAX as f64) as i16
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_render_length() {
        let tone = SineTone::new(16384.0, 440.0);
        for &count in &[0usize, 1, 2, 441, 44100] {
            assert_eq!(tone.render(44100, count).unwrap().len(), count);
        }
    }

    #[test]
    fn test_render_empty() {
        let tone = SineTone::new(16384.0, 440.0);
        assert!(tone.render(44100, 0).unwrap().is_empty());
    }

    #[test]
    fn test_first_sample_is_zero() {
        let tone = SineTone::new(16384.0, 440.0);
        let buffer = tone.render(44100, 16).unwrap();
        assert_eq!(buffer.as_slice()[0], 0);
    }

    #[test]
    fn test_quarter_period_peaks() {
        // 1 Hz at 4 Hz sample rate lands exactly on 0, peak, 0, trough.
        let tone = SineTone::new(1000.0, 1.0);
        let buffer = tone.render(4, 4).unwrap();
        assert_eq!(buffer.as_slice(), &[0, 1000, 0, -1000]);
    }

    #[test]
    fn test_peak_stays_within_amplitude() {
        let tone = SineTone::new(16384.0, 440.0);
        let buffer = tone.render(44100, 44100).unwrap();
        let peak = buffer.iter().map(|s| (*s as i32).abs()).max().unwrap();
        assert!(peak <= 16384);
        assert!(peak >= 16380, "peak {} too low", peak);
    }

    #[test]
    fn test_overdriven_amplitude_saturates() {
        let tone = SineTone::new(1_000_000.0, 1.0);
        let buffer = tone.render(4, 4).unwrap();
        assert_eq!(buffer.as_slice(), &[0, i16::MAX, 0, i16::MIN]);
    }

    #[test]
    fn test_no_drift_over_long_render() {
        // After exactly 100 s of a 1 Hz tone the phase is back at zero.
        let sample_rate = 8000;
        let index = sample_rate as usize * 100;
        assert_eq!(sine_sample(32767.0, 1.0, sample_rate, index), 0);
        assert_eq!(
            sine_sample(32767.0, 1.0, sample_rate, index + sample_rate as usize / 4),
            32767
        );
    }

    #[test]
    fn test_render_is_deterministic() {
        let tone = SineTone::new(12000.0, 261.63);
        let a = tone.render(48000, 4800).unwrap();
        let b = tone.render(48000, 4800).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_nan_maps_to_silence() {
        assert_eq!(to_i16(f64::NAN), 0);
        assert_eq!(to_i16(-0.4), 0);
        assert_eq!(to_i16(0.5), 1);
        assert_eq!(to_i16(-0.5), -1);
    }
}
