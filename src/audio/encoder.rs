//! In-memory WAV encoding for captured audio.

use hound::{SampleFormat, WavSpec, WavWriter};
use std::io::Cursor;

use crate::error::EncodingError;

/// Byte length of a canonical RIFF/WAVE header with a single data chunk.
pub const WAV_HEADER_LEN: usize = 44;

/// Serialize buffered chunks into a 16-bit PCM WAV file.
///
/// Pure function: deterministic output for a given input. An empty chunk
/// sequence yields a header-only file; callers decide whether that counts
/// as a usable recording.
pub fn encode_wav(
    chunks: &[Vec<i16>],
    sample_rate: u32,
    channels: u16,
) -> Result<Vec<u8>, EncodingError> {
    let spec = WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = WavWriter::new(&mut cursor, spec)?;
        for chunk in chunks {
            for &sample in chunk {
                writer.write_sample(sample)?;
            }
        }
        writer.finalize()?;
    }

    Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_chunks_yield_header_only() {
        let bytes = encode_wav(&[], 16000, 1).unwrap();
        assert_eq!(bytes.len(), WAV_HEADER_LEN);
    }

    #[test]
    fn test_output_is_deterministic() {
        let chunks = vec![vec![1i16, -1, 100, -100], vec![0i16; 8]];
        let a = encode_wav(&chunks, 16000, 1).unwrap();
        let b = encode_wav(&chunks, 16000, 1).unwrap();
        assert_eq!(a, b);
    }
}
