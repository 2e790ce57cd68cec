//! Audio output and playback for the syntak synthesizer.
//!
//! This crate provides:
//!
//! - **Engine facade**: [`SynthEngine`] ties parameters, playback, and
//!   oscilloscope snapshots together behind a `Send + Sync` handle
//! - **Transport**: [`Transport`] runs the single generation thread that
//!   renders blocks and pushes them into the device
//! - **Backends**: [`CpalOutput`] for the system audio device and
//!   [`RawPcmOutput`] for a raw 16-bit byte stream, both behind [`AudioOutput`]
//! - **WAV export**: [`write_wav`] and [`read_wav`]
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use syntak_io::{CpalOutput, SynthEngine};
//!
//! let engine = SynthEngine::new(Arc::new(CpalOutput::new()));
//! engine.set_wave_type("saw");
//! engine.set_parameter("tune", 220.0);
//! engine.start()?;
//! std::thread::sleep(std::time::Duration::from_secs(1));
//! engine.stop();
//! # Ok::<(), syntak_io::Error>(())
//! ```

pub mod backend;
mod cpal_backend;
mod engine;
pub mod pcm;
mod raw_backend;
mod transport;
mod wav;

pub use backend::{AudioOutput, PcmSink};
pub use cpal_backend::{
    AudioDevice, CpalOutput, CpalSink, default_output_device, list_output_devices,
};
pub use engine::SynthEngine;
pub use pcm::{ByteOrder, PcmFormat};
pub use raw_backend::{RawPcmOutput, RawPcmSink, RawTarget};
pub use transport::{DEFAULT_BLOCK_SIZE, Transport, TransportState};
pub use wav::{WavSpec, read_wav, write_wav};

/// Error types for audio output and playback.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The output device could not be opened.
    #[error("Audio device unavailable: {0}")]
    DeviceUnavailable(String),

    /// No output device available on the system.
    #[error("No audio device available")]
    NoDevice,

    /// Writing to an open device failed mid-stream.
    #[error("Audio device write failed: {0}")]
    DeviceWrite(String),

    /// The requested output device was not found.
    #[error("Device not found: {0}")]
    DeviceNotFound(String),

    /// The generation thread could not be spawned.
    #[error("Failed to spawn generation thread: {0}")]
    Spawn(#[source] std::io::Error),

    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type for audio output operations.
pub type Result<T> = std::result::Result<T, Error>;
