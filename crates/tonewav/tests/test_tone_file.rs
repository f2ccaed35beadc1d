//! End-to-end tests for generated tone files.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use pretty_assertions::assert_eq;
use tonewav::wav::compute_pcm_hash;
use tonewav::{
    decode_wav, generate, generate_to_path, FileSink, GenerationRequest, SineTone, StorageSink,
    ToneError,
};

fn one_second_a4() -> GenerationRequest {
    GenerationRequest {
        sample_rate: 44100,
        bits_per_sample: 16,
        channels: 1,
        amplitude: 16384.0,
        frequency: 440.0,
        duration_seconds: 1.0,
        sample_count: None,
    }
}

#[test]
fn test_one_second_a4() {
    let result = generate(&one_second_a4()).unwrap();
    let wav = &result.wav_data;

    assert_eq!(result.num_samples, 44100);
    assert_eq!(wav.len(), 88244);
    assert_eq!(u32::from_le_bytes([wav[4], wav[5], wav[6], wav[7]]), 88236);
    assert_eq!(&wav[22..24], &[0x01, 0x00]);
    assert_eq!(&wav[44..46], &[0x00, 0x00], "sin(0) must encode as zero");

    let decoded = decode_wav(wav).unwrap();
    assert_eq!(decoded.samples[0], 0);
    assert_eq!(decoded.samples.len(), 44100);
}

#[test]
fn test_round_trip_recovers_request() {
    let request = GenerationRequest {
        sample_rate: 22050,
        frequency: 1000.0,
        amplitude: 20000.0,
        ..Default::default()
    }
    .with_sample_count(2205);

    let result = generate(&request).unwrap();
    let decoded = decode_wav(&result.wav_data).unwrap();
    let expected = SineTone::new(20000.0, 1000.0).render(22050, 2205).unwrap();

    assert_eq!(decoded.header.sample_rate, 22050);
    assert_eq!(decoded.header.channels, 1);
    assert_eq!(decoded.header.bits_per_sample, 16);
    assert_eq!(decoded.samples.as_slice(), expected.as_slice());
}

#[test]
fn test_zero_samples_is_header_only() {
    let request = one_second_a4().with_sample_count(0);
    let result = generate(&request).unwrap();

    assert_eq!(result.wav_data.len(), 44);
    assert_eq!(&result.wav_data[40..44], &[0, 0, 0, 0]);
    assert!(decode_wav(&result.wav_data).unwrap().samples.is_empty());
}

#[test]
fn test_generation_is_idempotent() {
    let a = generate(&one_second_a4()).unwrap();
    let b = generate(&one_second_a4()).unwrap();
    assert_eq!(a.wav_data, b.wav_data);
    assert_eq!(a.pcm_hash, b.pcm_hash);
}

#[test]
fn test_amplitude_above_i16_is_rejected() {
    let request = GenerationRequest {
        amplitude: 40000.0,
        ..one_second_a4()
    };
    match generate(&request) {
        Err(ToneError::InvalidParameter { name, .. }) => assert_eq!(name, "amplitude"),
        other => panic!("expected amplitude rejection, got {:?}", other.map(|r| r.num_samples)),
    }
}

#[test]
fn test_file_sink_writes_tone() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("out").join("a4.wav");

    let summary = generate_to_path(&one_second_a4(), &mut FileSink::new(), &path).unwrap();
    let on_disk = fs::read(&path).unwrap();

    assert_eq!(summary.bytes_written, 88244);
    assert_eq!(on_disk.len(), 88244);
    assert_eq!(on_disk, generate(&one_second_a4()).unwrap().wav_data);
    assert_eq!(compute_pcm_hash(&on_disk), Some(summary.pcm_hash));
}

/// Filesystem sink whose handles stop accepting bytes partway through.
struct TruncatingSink {
    inner: FileSink,
    limit: usize,
}

struct LimitedFile {
    file: fs::File,
    remaining: usize,
}

impl Write for LimitedFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = buf.len().min(self.remaining);
        self.remaining -= n;
        self.file.write(&buf[..n])
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

impl StorageSink for TruncatingSink {
    type Handle = LimitedFile;

    fn open(&mut self, path: &Path) -> io::Result<Self::Handle> {
        Ok(LimitedFile {
            file: fs::File::create(path)?,
            remaining: self.limit,
        })
    }

    fn close(&mut self, handle: Self::Handle) -> io::Result<()> {
        handle.file.sync_all()
    }

    fn discard(&mut self, path: &Path) -> io::Result<()> {
        self.inner.discard(path)
    }
}

#[test]
fn test_failed_write_leaves_no_file() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("partial.wav");
    let mut sink = TruncatingSink {
        inner: FileSink::new(),
        limit: 1000,
    };

    let err = generate_to_path(&one_second_a4(), &mut sink, &path).unwrap_err();

    assert!(matches!(err, ToneError::Io(_)));
    assert!(!path.exists(), "partial output should be removed");
}

#[test]
fn test_unopenable_destination_is_io_error() {
    let tmp = tempfile::tempdir().unwrap();
    // A directory cannot be opened as a file.
    let err = generate_to_path(
        &one_second_a4().with_sample_count(10),
        &mut FileSink::new(),
        tmp.path(),
    )
    .unwrap_err();
    assert!(matches!(err, ToneError::Io(_)));
    assert!(tmp.path().is_dir());
}
