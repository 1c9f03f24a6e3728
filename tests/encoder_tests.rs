//! WAV encoding tests.

use std::io::Cursor;

use meetnote::audio::{encode_wav, WAV_HEADER_LEN};

#[test]
fn output_length_matches_sample_count() {
    let chunks = vec![vec![0i16; 1024], vec![0i16; 1024], vec![0i16; 512]];
    let total_samples: usize = chunks.iter().map(|c| c.len()).sum();

    let bytes = encode_wav(&chunks, 16000, 1).unwrap();
    assert_eq!(bytes.len(), WAV_HEADER_LEN + total_samples * 2);
}

#[test]
fn empty_chunks_produce_header_only_file() {
    let bytes = encode_wav(&[], 16000, 1).unwrap();
    assert_eq!(bytes.len(), WAV_HEADER_LEN);
}

#[test]
fn encoded_file_round_trips_through_hound() {
    let chunks = vec![vec![100i16, -100, 32767, -32768], vec![0i16, 1, 2, 3]];
    let bytes = encode_wav(&chunks, 16000, 1).unwrap();

    let mut reader = hound::WavReader::new(Cursor::new(bytes)).unwrap();
    let spec = reader.spec();
    assert_eq!(spec.sample_rate, 16000);
    assert_eq!(spec.channels, 1);
    assert_eq!(spec.bits_per_sample, 16);

    let samples: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
    let expected: Vec<i16> = chunks.into_iter().flatten().collect();
    assert_eq!(samples, expected);
}

#[test]
fn stereo_spec_is_preserved() {
    let chunks = vec![vec![1i16, 2, 3, 4]];
    let bytes = encode_wav(&chunks, 44100, 2).unwrap();

    let reader = hound::WavReader::new(Cursor::new(bytes)).unwrap();
    assert_eq!(reader.spec().sample_rate, 44100);
    assert_eq!(reader.spec().channels, 2);
}

#[test]
fn encoding_is_deterministic() {
    let chunks = vec![vec![7i16; 256], vec![-7i16; 256]];
    let a = encode_wav(&chunks, 16000, 1).unwrap();
    let b = encode_wav(&chunks, 16000, 1).unwrap();
    assert_eq!(a, b);
}
