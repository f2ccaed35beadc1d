#![no_main]

use libfuzzer_sys::fuzz_target;
use tonewav::wav::{decode_wav, WavHeader};

fuzz_target!(|data: &[u8]| {
    // Anything that decodes must re-encode to the same header bytes.
    if let Ok(decoded) = decode_wav(data) {
        assert_eq!(&decoded.header.to_bytes()[..], &data[..44]);
    }
    let _ = WavHeader::from_bytes(data);
});
