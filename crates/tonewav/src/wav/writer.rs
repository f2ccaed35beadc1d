//! Core WAV encoding and sink output.

use std::io::Write;
use std::path::Path;

use crate::buffer::SampleBuffer;
use crate::error::{ToneError, ToneResult};
use crate::sink::StorageSink;

use super::format::WavFormat;
use super::header::{WavHeader, HEADER_SIZE};

/// Writes a complete WAV file to a writer.
///
/// The header and the sample bytes are written back to back with
/// `write_all`, so a writer that stops accepting bytes yields an error rather
/// than a short file.
///
/// # Arguments
/// * `writer` - Output writer
/// * `header` - Header describing `pcm_data`
/// * `pcm_data` - Raw PCM samples as little-endian bytes
pub fn write_wav<W: Write>(writer: &mut W, header: &WavHeader, pcm_data: &[u8]) -> ToneResult<()> {
    if pcm_data.len() != header.data_size as usize {
        return Err(ToneError::invalid_param(
            "pcm_data",
            format!(
                "{} bytes supplied but header declares {}",
                pcm_data.len(),
                header.data_size
            ),
        ));
    }

    writer.write_all(&header.to_bytes())?;
    writer.write_all(pcm_data)?;
    writer.flush()?;

    Ok(())
}

/// Encodes a whole container into memory.
///
/// # Returns
/// Complete WAV file bytes, exactly `44 + data_size` long
pub fn encode_wav(format: &WavFormat, samples: &SampleBuffer) -> ToneResult<Vec<u8>> {
    let header = WavHeader::for_samples(format, frame_count(format, samples)?)?;
    let pcm = samples.to_pcm_le()?;

    let total = header.file_size();
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(total)
        .map_err(|_| ToneError::Allocation { bytes: total })?;

    write_wav(&mut buffer, &header, &pcm)?;
    Ok(buffer)
}

/// Opens `path` on `sink`, writes the container, and closes it.
///
/// If anything fails after the destination was opened, the partial output is
/// discarded before the error is returned.
pub fn write_container<S: StorageSink>(
    sink: &mut S,
    path: &Path,
    header: &WavHeader,
    pcm_data: &[u8],
) -> ToneResult<usize> {
    let mut handle = sink.open(path)?;

    let written = write_wav(&mut handle, header, pcm_data)
        .and_then(|()| sink.close(handle).map_err(ToneError::from));

    if let Err(err) = written {
        tracing::warn!(path = %path.display(), error = %err, "discarding partial output");
        if let Err(discard_err) = sink.discard(path) {
            tracing::warn!(path = %path.display(), error = %discard_err, "failed to discard partial output");
        }
        return Err(err);
    }

    Ok(HEADER_SIZE + pcm_data.len())
}

/// Number of frames in `samples` for `format`.
fn frame_count(format: &WavFormat, samples: &SampleBuffer) -> ToneResult<usize> {
    if format.bits_per_sample != 16 {
        return Err(ToneError::invalid_param(
            "bits_per_sample",
            format!("sample buffers hold 16-bit samples, format declares {}", format.bits_per_sample),
        ));
    }
    let channels = format.channels.max(1) as usize;
    if samples.len() % channels != 0 {
        return Err(ToneError::invalid_param(
            "samples",
            format!("{} samples do not fill {}-channel frames", samples.len(), channels),
        ));
    }
    Ok(samples.len() / channels)
}

/// WAV encoder bound to one format.
#[derive(Debug, Clone, Copy)]
pub struct WavEncoder {
    format: WavFormat,
}

impl WavEncoder {
    /// Creates an encoder for `format`.
    pub fn new(format: WavFormat) -> Self {
        Self { format }
    }

    /// Creates a 16-bit mono encoder.
    pub fn mono(sample_rate: u32) -> Self {
        Self::new(WavFormat::mono(sample_rate))
    }

    /// Format this encoder writes.
    pub fn format(&self) -> &WavFormat {
        &self.format
    }

    /// Header for `samples`.
    pub fn header(&self, samples: &SampleBuffer) -> ToneResult<WavHeader> {
        WavHeader::for_samples(&self.format, frame_count(&self.format, samples)?)
    }

    /// Encodes `samples` to a byte vector.
    pub fn encode(&self, samples: &SampleBuffer) -> ToneResult<Vec<u8>> {
        encode_wav(&self.format, samples)
    }

    /// Writes `samples` to `path` on `sink`, returning the bytes written.
    pub fn write_to<S: StorageSink>(
        &self,
        sink: &mut S,
        path: &Path,
        samples: &SampleBuffer,
    ) -> ToneResult<usize> {
        let header = self.header(samples)?;
        let pcm = samples.to_pcm_le()?;
        write_container(sink, path, &header, &pcm)
    }
}
