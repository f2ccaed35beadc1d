//! Canonical 44-byte RIFF/WAVE header.

use crate::error::{ToneError, ToneResult};

use super::format::WavFormat;

/// Size of the canonical header in bytes.
pub const HEADER_SIZE: usize = 44;

/// Length of the PCM `fmt ` chunk body.
pub const PCM_FMT_LENGTH: u32 = 16;

/// Format tag for uncompressed linear PCM.
pub const FORMAT_PCM: u16 = 1;

/// Largest data chunk whose RIFF size still fits in 32 bits.
pub const MAX_DATA_SIZE: u32 = u32::MAX - (HEADER_SIZE as u32 - 8);

const OFFSET_RIFF: usize = 0;
const OFFSET_RIFF_SIZE: usize = 4;
const OFFSET_WAVE: usize = 8;
const OFFSET_FMT: usize = 12;
const OFFSET_FMT_LENGTH: usize = 16;
const OFFSET_FORMAT_TAG: usize = 20;
const OFFSET_CHANNELS: usize = 22;
const OFFSET_SAMPLE_RATE: usize = 24;
const OFFSET_BYTE_RATE: usize = 28;
const OFFSET_BLOCK_ALIGN: usize = 32;
pub(super) const OFFSET_BITS_PER_SAMPLE: usize = 34;
const OFFSET_DATA: usize = 36;
const OFFSET_DATA_SIZE: usize = 40;

/// Every field of a single-`fmt `, single-`data` PCM container header.
///
/// Values are fully derived by [`WavHeader::for_samples`] and never change
/// afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavHeader {
    /// Size of everything after the first 8 bytes.
    pub riff_size: u32,
    /// Length of the `fmt ` chunk body (16 for PCM).
    pub fmt_length: u32,
    /// Audio format tag (1 = PCM).
    pub format_tag: u16,
    /// Number of channels.
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bytes per second.
    pub byte_rate: u32,
    /// Bytes per sample frame.
    pub block_align: u16,
    /// Bits per sample.
    pub bits_per_sample: u16,
    /// Size of the sample data in bytes.
    pub data_size: u32,
}

impl WavHeader {
    /// Container magic.
    pub const RIFF: [u8; 4] = *b"RIFF";
    /// Form type.
    pub const WAVE: [u8; 4] = *b"WAVE";
    /// Format chunk marker, including its trailing space.
    pub const FMT: [u8; 4] = *b"fmt ";
    /// Data chunk marker.
    pub const DATA: [u8; 4] = *b"data";

    /// Derives the header for `sample_count` frames in `format`.
    pub fn for_samples(format: &WavFormat, sample_count: usize) -> ToneResult<Self> {
        format.validate()?;

        let data_size = format
            .data_size(sample_count)
            .and_then(|size| u32::try_from(size).ok())
            .filter(|&size| size <= MAX_DATA_SIZE)
            .ok_or_else(|| {
                ToneError::invalid_param(
                    "sample_count",
                    format!(
                        "{} samples need more data bytes than a WAV file can hold ({})",
                        sample_count, MAX_DATA_SIZE
                    ),
                )
            })?;

        Ok(Self {
            riff_size: data_size + (HEADER_SIZE as u32 - 8),
            fmt_length: PCM_FMT_LENGTH,
            format_tag: FORMAT_PCM,
            channels: format.channels,
            sample_rate: format.sample_rate,
            byte_rate: format.byte_rate(),
            block_align: format.block_align(),
            bits_per_sample: format.bits_per_sample,
            data_size,
        })
    }

    /// Format parameters described by this header.
    pub fn format(&self) -> WavFormat {
        WavFormat::new(self.channels, self.sample_rate, self.bits_per_sample)
    }

    /// Number of frames in the data chunk.
    pub fn sample_count(&self) -> usize {
        if self.block_align == 0 {
            return 0;
        }
        (self.data_size / self.block_align as u32) as usize
    }

    /// Playback length in seconds.
    pub fn duration_seconds(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.sample_count() as f64 / self.sample_rate as f64
    }

    /// Total container size on disk, header included.
    pub fn file_size(&self) -> usize {
        HEADER_SIZE + self.data_size as usize
    }

    /// Packs the header into its little-endian on-disk layout.
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut buf = [0u8; HEADER_SIZE];

        buf[OFFSET_RIFF..OFFSET_RIFF + 4].copy_from_slice(&Self::RIFF);
        buf[OFFSET_RIFF_SIZE..OFFSET_RIFF_SIZE + 4].copy_from_slice(&self.riff_size.to_le_bytes());
        buf[OFFSET_WAVE..OFFSET_WAVE + 4].copy_from_slice(&Self::WAVE);

        buf[OFFSET_FMT..OFFSET_FMT + 4].copy_from_slice(&Self::FMT);
        buf[OFFSET_FMT_LENGTH..OFFSET_FMT_LENGTH + 4]
            .copy_from_slice(&self.fmt_length.to_le_bytes());
        buf[OFFSET_FORMAT_TAG..OFFSET_FORMAT_TAG + 2]
            .copy_from_slice(&self.format_tag.to_le_bytes());
        buf[OFFSET_CHANNELS..OFFSET_CHANNELS + 2].copy_from_slice(&self.channels.to_le_bytes());
        buf[OFFSET_SAMPLE_RATE..OFFSET_SAMPLE_RATE + 4]
            .copy_from_slice(&self.sample_rate.to_le_bytes());
        buf[OFFSET_BYTE_RATE..OFFSET_BYTE_RATE + 4].copy_from_slice(&self.byte_rate.to_le_bytes());
        buf[OFFSET_BLOCK_ALIGN..OFFSET_BLOCK_ALIGN + 2]
            .copy_from_slice(&self.block_align.to_le_bytes());
        buf[OFFSET_BITS_PER_SAMPLE..OFFSET_BITS_PER_SAMPLE + 2]
            .copy_from_slice(&self.bits_per_sample.to_le_bytes());

        buf[OFFSET_DATA..OFFSET_DATA + 4].copy_from_slice(&Self::DATA);
        buf[OFFSET_DATA_SIZE..OFFSET_DATA_SIZE + 4].copy_from_slice(&self.data_size.to_le_bytes());

        buf
    }

    /// Unpacks and validates a canonical header from the start of `bytes`.
    ///
    /// Only the first [`HEADER_SIZE`] bytes are examined.
    pub fn from_bytes(bytes: &[u8]) -> ToneResult<Self> {
        if bytes.len() < HEADER_SIZE {
            return Err(ToneError::malformed(
                bytes.len(),
                format!(
                    "header too short: {} bytes (minimum {} required)",
                    bytes.len(),
                    HEADER_SIZE
                ),
            ));
        }

        expect_tag(bytes, OFFSET_RIFF, &Self::RIFF)?;
        expect_tag(bytes, OFFSET_WAVE, &Self::WAVE)?;
        expect_tag(bytes, OFFSET_FMT, &Self::FMT)?;
        expect_tag(bytes, OFFSET_DATA, &Self::DATA)?;

        let header = Self {
            riff_size: read_u32(bytes, OFFSET_RIFF_SIZE),
            fmt_length: read_u32(bytes, OFFSET_FMT_LENGTH),
            format_tag: read_u16(bytes, OFFSET_FORMAT_TAG),
            channels: read_u16(bytes, OFFSET_CHANNELS),
            sample_rate: read_u32(bytes, OFFSET_SAMPLE_RATE),
            byte_rate: read_u32(bytes, OFFSET_BYTE_RATE),
            block_align: read_u16(bytes, OFFSET_BLOCK_ALIGN),
            bits_per_sample: read_u16(bytes, OFFSET_BITS_PER_SAMPLE),
            data_size: read_u32(bytes, OFFSET_DATA_SIZE),
        };
        header.check_fields()?;

        Ok(header)
    }

    fn check_fields(&self) -> ToneResult<()> {
        if self.fmt_length != PCM_FMT_LENGTH {
            return Err(ToneError::malformed(
                OFFSET_FMT_LENGTH,
                format!("fmt chunk length {} (expected {})", self.fmt_length, PCM_FMT_LENGTH),
            ));
        }
        if self.format_tag != FORMAT_PCM {
            return Err(ToneError::malformed(
                OFFSET_FORMAT_TAG,
                format!("unsupported format tag {} (expected PCM)", self.format_tag),
            ));
        }
        if self.channels == 0 {
            return Err(ToneError::malformed(OFFSET_CHANNELS, "zero channels"));
        }
        if self.sample_rate == 0 {
            return Err(ToneError::malformed(OFFSET_SAMPLE_RATE, "zero sample rate"));
        }
        if self.bits_per_sample == 0 || self.bits_per_sample % 8 != 0 {
            return Err(ToneError::malformed(
                OFFSET_BITS_PER_SAMPLE,
                format!("invalid bits per sample {}", self.bits_per_sample),
            ));
        }

        let format = self.format();
        if format.validate().is_err() || self.byte_rate != format.byte_rate() {
            return Err(ToneError::malformed(
                OFFSET_BYTE_RATE,
                format!(
                    "byte rate {} does not match format (expected {})",
                    self.byte_rate,
                    format.byte_rate()
                ),
            ));
        }
        if self.block_align != format.block_align() {
            return Err(ToneError::malformed(
                OFFSET_BLOCK_ALIGN,
                format!(
                    "block align {} does not match format (expected {})",
                    self.block_align,
                    format.block_align()
                ),
            ));
        }
        if self.data_size > MAX_DATA_SIZE || self.data_size % self.block_align as u32 != 0 {
            return Err(ToneError::malformed(
                OFFSET_DATA_SIZE,
                format!(
                    "data size {} is not a whole number of {}-byte frames",
                    self.data_size, self.block_align
                ),
            ));
        }
        if self.riff_size != self.data_size + (HEADER_SIZE as u32 - 8) {
            return Err(ToneError::malformed(
                OFFSET_RIFF_SIZE,
                format!(
                    "RIFF size {} does not match data size {}",
                    self.riff_size, self.data_size
                ),
            ));
        }
        Ok(())
    }
}

fn expect_tag(bytes: &[u8], offset: usize, tag: &[u8; 4]) -> ToneResult<()> {
    let found = &bytes[offset..offset + 4];
    if found != tag {
        return Err(ToneError::malformed(
            offset,
            format!(
                "expected '{}', got {:?}",
                String::from_utf8_lossy(tag),
                found
            ),
        ));
    }
    Ok(())
}

fn read_u16(bytes: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([bytes[offset], bytes[offset + 1]])
}

fn read_u32(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}
