//! Audio capture and encoding.

pub mod capture;
pub mod encoder;

pub use capture::MicCapture;
pub use encoder::{encode_wav, WAV_HEADER_LEN};

use crate::error::CaptureError;

/// Trait for audio capture sources.
///
/// A source buffers fixed-size chunks of 16-bit PCM samples between `start`
/// and `stop`. Exactly one background task writes to the buffer while active;
/// the buffer is only read after `stop` has halted that task.
pub trait CaptureSource: Send {
    /// Start capturing audio. Fails if the input device cannot be opened or
    /// capture is already active.
    fn start(&mut self) -> Result<(), CaptureError>;

    /// Stop capturing and return the buffered chunks in capture order.
    /// Releases the input device. Fails with `EmptyRecording` when nothing
    /// was captured.
    fn stop(&mut self) -> Result<Vec<Vec<i16>>, CaptureError>;

    /// Whether this source is currently capturing.
    fn is_active(&self) -> bool;
}
