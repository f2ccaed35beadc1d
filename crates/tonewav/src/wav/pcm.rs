//! PCM data extraction and hashing utilities.

use super::header::{WavHeader, HEADER_SIZE};

/// Computes the BLAKE3 hash of raw PCM bytes.
///
/// The hash covers sample data only, so two containers with identical audio
/// hash the same regardless of header contents.
pub fn pcm_hash(pcm: &[u8]) -> String {
    blake3::hash(pcm).to_hex().to_string()
}

/// Extracts PCM data from a canonical WAV file buffer.
///
/// # Returns
/// PCM data if the header is valid and the data chunk is complete, or None
pub fn extract_pcm_data(wav_data: &[u8]) -> Option<&[u8]> {
    let header = WavHeader::from_bytes(wav_data).ok()?;
    let data_end = HEADER_SIZE + header.data_size as usize;
    wav_data.get(HEADER_SIZE..data_end)
}

/// Computes the PCM hash of a WAV file.
///
/// # Returns
/// BLAKE3 hash of PCM data, or None if format is invalid
pub fn compute_pcm_hash(wav_data: &[u8]) -> Option<String> {
    extract_pcm_data(wav_data).map(pcm_hash)
}
