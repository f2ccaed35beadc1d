//! tonewav
//!
//! Synthesizes a single sine tone and serializes it as a canonical 16-bit PCM
//! mono WAV file.
//!
//! # Overview
//!
//! Generation is a straight pipeline:
//!
//! 1. [`GenerationRequest`] carries the scalar inputs and is validated up front.
//! 2. [`SineTone::render`] fills a fixed-length [`SampleBuffer`].
//! 3. [`WavHeader::for_samples`] derives the 44-byte header.
//! 4. The header and sample bytes are written to a [`StorageSink`].
//!
//! # Determinism
//!
//! Output depends only on the request. Every sample's phase is computed from
//! its index, and the container carries no timestamps or metadata, so the same
//! request always yields byte-identical files.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use tonewav::{generate_to_path, FileSink, GenerationRequest};
//!
//! let request = GenerationRequest::default().with_duration(1.0);
//! let summary = generate_to_path(&request, &mut FileSink::new(), Path::new("a4.wav"))?;
//! println!("PCM hash: {}", summary.pcm_hash);
//! # Ok::<(), tonewav::ToneError>(())
//! ```
//!
//! # Crate Structure
//!
//! - [`generate()`] / [`generate_to_path()`] - Main entry points
//! - [`config`] - Generation request and defaults
//! - [`synth`] - Sine tone synthesis
//! - [`buffer`] - Fixed-length sample buffer
//! - [`wav`] - Header packing, encoding and verification decoding
//! - [`sink`] - Storage sinks

pub mod buffer;
pub mod config;
pub mod error;
pub mod generate;
pub mod sink;
pub mod synth;
pub mod wav;

// Re-export main types at crate root
pub use buffer::SampleBuffer;
pub use config::GenerationRequest;
pub use error::{ToneError, ToneResult};
pub use generate::{generate, generate_to_path, WavResult, WavSummary};
pub use sink::{FileSink, MemorySink, StorageSink};
pub use synth::SineTone;
pub use wav::{decode_wav, DecodedWav, WavEncoder, WavFormat, WavHeader};
