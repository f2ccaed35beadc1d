//! Decoder for the canonical containers this crate writes.
//!
//! Accepts exactly one `fmt ` chunk followed by one 16-bit `data` chunk and
//! nothing else; it is meant for verifying output, not for general WAV input.

use crate::error::{ToneError, ToneResult};

use super::header::{WavHeader, HEADER_SIZE, OFFSET_BITS_PER_SAMPLE};

/// A decoded canonical container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedWav {
    /// Parsed and validated header.
    pub header: WavHeader,
    /// Interleaved 16-bit samples.
    pub samples: Vec<i16>,
}

/// Decodes a canonical 16-bit PCM container.
pub fn decode_wav(wav_data: &[u8]) -> ToneResult<DecodedWav> {
    let header = WavHeader::from_bytes(wav_data)?;

    if header.bits_per_sample != 16 {
        return Err(ToneError::malformed(
            OFFSET_BITS_PER_SAMPLE,
            format!("only 16-bit samples are decoded, got {}", header.bits_per_sample),
        ));
    }

    let data = &wav_data[HEADER_SIZE..];
    let data_size = header.data_size as usize;
    if data.len() < data_size {
        return Err(ToneError::malformed(
            wav_data.len(),
            format!(
                "data chunk truncated: {} of {} bytes present",
                data.len(),
                data_size
            ),
        ));
    }
    if data.len() > data_size {
        return Err(ToneError::malformed(
            HEADER_SIZE + data_size,
            format!("{} trailing bytes after data chunk", data.len() - data_size),
        ));
    }

    let samples = data
        .chunks_exact(2)
        .map(|chunk| i16::from_le_bytes([chunk[0], chunk[1]]))
        .collect();

    Ok(DecodedWav { header, samples })
}
