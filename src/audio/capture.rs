//! Microphone audio capture via cpal.
//!
//! The `cpal::Stream` is not `Send`, so a dedicated thread owns it for the
//! lifetime of the capture. The stream callback appends fixed-size chunks to
//! a shared buffer while the recording flag is set; `stop` clears the flag
//! and waits (bounded) for the thread to release the device.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

use super::CaptureSource;
use crate::config::AudioConfig;
use crate::error::CaptureError;

/// How long `stop` waits for the capture thread to exit.
const STOP_TIMEOUT: Duration = Duration::from_secs(3);
/// How long `start` waits for the capture thread to open the device.
const OPEN_TIMEOUT: Duration = Duration::from_secs(3);

const POLL_INTERVAL: Duration = Duration::from_millis(50);

pub struct MicCapture {
    sample_rate: u32,
    channels: u16,
    chunk_size: usize,
    chunks: Arc<Mutex<Vec<Vec<i16>>>>,
    recording: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
}

impl MicCapture {
    pub fn new(config: &AudioConfig) -> Self {
        Self {
            sample_rate: config.sample_rate,
            channels: config.channels,
            chunk_size: config.chunk_size,
            chunks: Arc::new(Mutex::new(Vec::new())),
            recording: Arc::new(AtomicBool::new(false)),
            worker: None,
        }
    }

    /// Runs on the dedicated capture thread. Opens the device, plays the
    /// stream, and keeps it alive until the recording flag is cleared.
    fn capture_loop(
        sample_rate: u32,
        channels: u16,
        chunk_size: usize,
        chunks: Arc<Mutex<Vec<Vec<i16>>>>,
        recording: Arc<AtomicBool>,
        ready_tx: mpsc::Sender<Result<(), CaptureError>>,
    ) {
        let host = cpal::default_host();
        let device = match host.default_input_device() {
            Some(d) => d,
            None => {
                let _ = ready_tx.send(Err(CaptureError::DeviceUnavailable));
                return;
            }
        };

        info!(
            "Capturing from input device: {}",
            device.name().unwrap_or_else(|_| "unknown".to_string())
        );

        let stream_config = cpal::StreamConfig {
            channels,
            sample_rate: cpal::SampleRate(sample_rate),
            buffer_size: cpal::BufferSize::Default,
        };

        // Samples per chunk: chunk_size frames, interleaved.
        let samples_per_chunk = chunk_size * channels as usize;
        let mut pending: Vec<i16> = Vec::with_capacity(samples_per_chunk);

        let chunks_for_cb = chunks.clone();
        let recording_for_cb = recording.clone();
        let err_fn = |err| error!("Input stream error: {}", err);

        let stream = device.build_input_stream(
            &stream_config,
            move |data: &[f32], _: &cpal::InputCallbackInfo| {
                if !recording_for_cb.load(Ordering::SeqCst) {
                    return;
                }
                for &sample in data {
                    let clamped = sample.clamp(-1.0, 1.0);
                    pending.push((clamped * i16::MAX as f32) as i16);
                    if pending.len() == samples_per_chunk {
                        let chunk = std::mem::replace(
                            &mut pending,
                            Vec::with_capacity(samples_per_chunk),
                        );
                        if let Ok(mut buffered) = chunks_for_cb.lock() {
                            buffered.push(chunk);
                        }
                    }
                }
            },
            err_fn,
            None,
        );

        let stream = match stream {
            Ok(s) => s,
            Err(e) => {
                let _ = ready_tx.send(Err(CaptureError::StreamOpen(e.to_string())));
                return;
            }
        };

        if let Err(e) = stream.play() {
            let _ = ready_tx.send(Err(CaptureError::StreamOpen(e.to_string())));
            return;
        }

        let _ = ready_tx.send(Ok(()));

        while recording.load(Ordering::SeqCst) {
            std::thread::sleep(POLL_INTERVAL);
        }

        // Dropping the stream stops the callback and releases the device.
        drop(stream);
        debug!("Capture thread exiting");
    }
}

impl CaptureSource for MicCapture {
    fn start(&mut self) -> Result<(), CaptureError> {
        if self.is_active() {
            return Err(CaptureError::AlreadyActive);
        }

        if let Ok(mut buffered) = self.chunks.lock() {
            buffered.clear();
        }
        self.recording.store(true, Ordering::SeqCst);

        let (ready_tx, ready_rx) = mpsc::channel();
        let sample_rate = self.sample_rate;
        let channels = self.channels;
        let chunk_size = self.chunk_size;
        let chunks = self.chunks.clone();
        let recording = self.recording.clone();

        let worker = std::thread::spawn(move || {
            Self::capture_loop(sample_rate, channels, chunk_size, chunks, recording, ready_tx);
        });

        match ready_rx.recv_timeout(OPEN_TIMEOUT) {
            Ok(Ok(())) => {
                self.worker = Some(worker);
                info!("Microphone capture started ({} Hz)", self.sample_rate);
                Ok(())
            }
            Ok(Err(e)) => {
                self.recording.store(false, Ordering::SeqCst);
                let _ = worker.join();
                Err(e)
            }
            Err(_) => {
                self.recording.store(false, Ordering::SeqCst);
                let _ = worker.join();
                Err(CaptureError::StreamOpen(
                    "timed out waiting for input device".to_string(),
                ))
            }
        }
    }

    fn stop(&mut self) -> Result<Vec<Vec<i16>>, CaptureError> {
        if !self.is_active() {
            return Err(CaptureError::NotActive);
        }

        self.recording.store(false, Ordering::SeqCst);

        if let Some(worker) = self.worker.take() {
            let deadline = Instant::now() + STOP_TIMEOUT;
            while !worker.is_finished() && Instant::now() < deadline {
                std::thread::sleep(POLL_INTERVAL);
            }
            if worker.is_finished() {
                if worker.join().is_err() {
                    warn!("Capture thread panicked during shutdown");
                }
            } else {
                // Abandon the thread; the cleared flag will let it exit on
                // its own and release the device.
                warn!("Capture thread did not stop within {:?}", STOP_TIMEOUT);
            }
        }

        let chunks = {
            let mut buffered = self
                .chunks
                .lock()
                .map_err(|_| CaptureError::StreamOpen("capture buffer poisoned".to_string()))?;
            std::mem::take(&mut *buffered)
        };

        if chunks.is_empty() {
            return Err(CaptureError::EmptyRecording);
        }

        info!("Microphone capture stopped, {} chunks buffered", chunks.len());
        Ok(chunks)
    }

    fn is_active(&self) -> bool {
        self.recording.load(Ordering::SeqCst)
    }
}

impl Drop for MicCapture {
    fn drop(&mut self) {
        if self.is_active() {
            debug!("Dropping active MicCapture, cleaning up");
            let _ = self.stop();
        }
    }
}
