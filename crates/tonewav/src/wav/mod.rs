//! Deterministic WAV container encoding.
//!
//! This module writes canonical 44-byte-header PCM WAV files: one `fmt ` chunk,
//! one `data` chunk, no metadata. Output depends only on the format and the
//! samples, so identical inputs always produce identical bytes.

mod format;
mod header;
mod pcm;
mod reader;
mod writer;


// Re-export public API
pub use format::WavFormat;
pub use header::{WavHeader, FORMAT_PCM, HEADER_SIZE, MAX_DATA_SIZE, PCM_FMT_LENGTH};
pub use pcm::{compute_pcm_hash, extract_pcm_data, pcm_hash};
pub use reader::{decode_wav, DecodedWav};
pub use writer::{encode_wav, write_container, write_wav, WavEncoder};
