//! Fixed-length mono sample buffer.

use crate::error::{ToneError, ToneResult};

/// Bytes occupied by one encoded 16-bit sample.
pub const BYTES_PER_SAMPLE: usize = 2;

/// An ordered, fixed-length run of signed 16-bit samples, one per frame.
///
/// The length is set at construction and never changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleBuffer {
    samples: Box<[i16]>,
}

impl SampleBuffer {
    /// Allocates a buffer of `len` silent samples.
    ///
    /// Returns [`ToneError::Allocation`] if the memory cannot be reserved.
    pub fn zeroed(len: usize) -> ToneResult<Self> {
        let bytes = len.saturating_mul(BYTES_PER_SAMPLE);
        let mut samples = Vec::new();
        samples
            .try_reserve_exact(len)
            .map_err(|_| ToneError::Allocation { bytes })?;
        samples.resize(len, 0);

        Ok(Self {
            samples: samples.into_boxed_slice(),
        })
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns true if the buffer holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Samples as a slice.
    pub fn as_slice(&self) -> &[i16] {
        &self.samples
    }

    /// Samples as a mutable slice. Elements can change, the length cannot.
    pub fn as_mut_slice(&mut self) -> &mut [i16] {
        &mut self.samples
    }

    /// Iterates over the samples in order.
    pub fn iter(&self) -> std::slice::Iter<'_, i16> {
        self.samples.iter()
    }

    /// Size of the encoded sample data in bytes.
    pub fn byte_len(&self) -> usize {
        self.samples.len() * BYTES_PER_SAMPLE
    }

    /// Encodes the samples as little-endian 16-bit PCM bytes.
    pub fn to_pcm_le(&self) -> ToneResult<Vec<u8>> {
        let bytes = self.byte_len();
        let mut pcm = Vec::new();
        pcm.try_reserve_exact(bytes)
            .map_err(|_| ToneError::Allocation { bytes })?;

        for sample in self.samples.iter() {
            pcm.extend_from_slice(&sample.to_le_bytes());
        }

        Ok(pcm)
    }
}

impl From<Vec<i16>> for SampleBuffer {
    fn from(samples: Vec<i16>) -> Self {
        Self {
            samples: samples.into_boxed_slice(),
        }
    }
}

impl AsRef<[i16]> for SampleBuffer {
    fn as_ref(&self) -> &[i16] {
        &self.samples
    }
}

impl<'a> IntoIterator for &'a SampleBuffer {
    type Item = &'a i16;
    type IntoIter = std::slice::Iter<'a, i16>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_zeroed_has_requested_length() {
        let buffer = SampleBuffer::zeroed(128).unwrap();
        assert_eq!(buffer.len(), 128);
        assert!(buffer.iter().all(|&s| s == 0));
    }

    #[test]
    fn test_zeroed_empty() {
        let buffer = SampleBuffer::zeroed(0).unwrap();
        assert!(buffer.is_empty());
        assert_eq!(buffer.byte_len(), 0);
        assert!(buffer.to_pcm_le().unwrap().is_empty());
    }

    #[test]
    fn test_impossible_allocation_is_reported() {
        let err = SampleBuffer::zeroed(usize::MAX).unwrap_err();
        assert!(matches!(err, ToneError::Allocation { .. }));
    }

    #[test]
    fn test_pcm_is_little_endian() {
        let buffer = SampleBuffer::from(vec![0x0102, -2, i16::MIN, i16::MAX]);
        let pcm = buffer.to_pcm_le().unwrap();
        assert_eq!(
            pcm,
            vec![0x02, 0x01, 0xFE, 0xFF, 0x00, 0x80, 0xFF, 0x7F]
        );
    }

    #[test]
    fn test_mutation_keeps_length() {
        let mut buffer = SampleBuffer::zeroed(4).unwrap();
        buffer.as_mut_slice()[2] = 1234;
        assert_eq!(buffer.len(), 4);
        assert_eq!(buffer.as_slice(), &[0, 0, 1234, 0]);
    }
}
