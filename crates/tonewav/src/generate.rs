//! Main entry point for tone generation.
//!
//! This module takes a request and produces a WAV container deterministically.

use std::path::{Path, PathBuf};

use crate::buffer::SampleBuffer;
use crate::config::GenerationRequest;
use crate::error::ToneResult;
use crate::sink::StorageSink;
use crate::wav::{encode_wav, pcm_hash, write_container, WavFormat, WavHeader, HEADER_SIZE};

/// Result of in-memory generation.
#[derive(Debug)]
pub struct WavResult {
    /// Complete WAV file bytes.
    pub wav_data: Vec<u8>,
    /// BLAKE3 hash of PCM data only.
    pub pcm_hash: String,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Number of samples.
    pub num_samples: usize,
}

impl WavResult {
    /// Returns the duration in seconds.
    pub fn duration_seconds(&self) -> f64 {
        self.num_samples as f64 / self.sample_rate as f64
    }
}

/// Summary of a file written through a sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WavSummary {
    /// Destination path.
    pub path: PathBuf,
    /// Bytes written, header included.
    pub bytes_written: usize,
    /// Number of samples.
    pub num_samples: usize,
    /// BLAKE3 hash of PCM data only.
    pub pcm_hash: String,
}

/// Generates a tone and encodes it into memory.
pub fn generate(request: &GenerationRequest) -> ToneResult<WavResult> {
    let (format, samples) = render(request)?;
    let wav_data = encode_wav(&format, &samples)?;
    let pcm_hash = pcm_hash(&wav_data[HEADER_SIZE..]);

    tracing::info!(bytes = wav_data.len(), samples = samples.len(), "encoded tone");

    Ok(WavResult {
        wav_data,
        pcm_hash,
        sample_rate: format.sample_rate,
        num_samples: samples.len(),
    })
}

/// Generates a tone and writes it to `path` on `sink`.
pub fn generate_to_path<S: StorageSink>(
    request: &GenerationRequest,
    sink: &mut S,
    path: &Path,
) -> ToneResult<WavSummary> {
    let (format, samples) = render(request)?;
    let header = WavHeader::for_samples(&format, samples.len())?;
    tracing::debug!(
        riff_size = header.riff_size,
        byte_rate = header.byte_rate,
        block_align = header.block_align,
        data_size = header.data_size,
        "derived header"
    );

    let pcm = samples.to_pcm_le()?;
    let bytes_written = write_container(sink, path, &header, &pcm)?;
    let pcm_hash = pcm_hash(&pcm);

    tracing::info!(
        path = %path.display(),
        bytes = bytes_written,
        samples = samples.len(),
        "wrote tone"
    );

    Ok(WavSummary {
        path: path.to_path_buf(),
        bytes_written,
        num_samples: samples.len(),
        pcm_hash,
    })
}

fn render(request: &GenerationRequest) -> ToneResult<(WavFormat, SampleBuffer)> {
    request.validate()?;

    let format = request.format();
    let sample_count = request.resolved_sample_count();
    // Fail before allocating if the result can't be described by a header.
    WavHeader::for_samples(&format, sample_count)?;

    tracing::debug!(
        sample_rate = request.sample_rate,
        frequency = request.frequency,
        amplitude = request.amplitude,
        sample_count,
        "rendering tone"
    );

    let samples = request.tone().render(request.sample_rate, sample_count)?;
    Ok((format, samples))
}
