//! Pluggable audio output abstraction.
//!
//! The transport pushes fixed-size blocks of 16-bit PCM into a [`PcmSink`] and
//! relies on the sink blocking when its buffer is full; that backpressure is the
//! generation loop's only pacing. An [`AudioOutput`] is the factory the
//! transport opens a fresh sink from on every `start()`, so a stopped device is
//! never reused.
//!
//! ```text
//! ┌──────────────┐  open(format)  ┌────────────────┐
//! │  Transport   │ ─────────────▶ │  AudioOutput   │
//! └──────┬───────┘                └───────┬────────┘
//!        │ write(block)                   │ creates
//!        ▼                                ▼
//! ┌──────────────────────────────────────────────────┐
//! │ PcmSink: CpalSink │ RawPcmSink │ (test doubles)  │
//! └──────────────────────────────────────────────────┘
//! ```
//!
//! Both traits are object-safe so the backend can be picked at runtime from
//! configuration.

use crate::Result;
use crate::pcm::PcmFormat;
use std::ops::RangeInclusive;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

/// Factory for output sinks.
pub trait AudioOutput: Send + Sync {
    /// Human-readable backend name (e.g., "cpal", "raw").
    fn name(&self) -> &str;

    /// Open the device and return a sink ready to accept blocks.
    ///
    /// Failure to acquire the device is reported as
    /// [`Error::DeviceUnavailable`](crate::Error::DeviceUnavailable) or
    /// [`Error::NoDevice`](crate::Error::NoDevice).
    fn open(&self, format: &PcmFormat) -> Result<Box<dyn PcmSink>>;
}

/// An open output device accepting mono 16-bit blocks.
pub trait PcmSink: Send {
    /// Write one block, blocking while the device buffer is full.
    fn write(&mut self, block: &[i16]) -> Result<()>;

    /// Hand the sink the transport's run flag. A sink whose `write` can wait
    /// on the device must give up waiting once the flag goes false.
    fn watch_running(&mut self, _running: Arc<AtomicBool>) {}

    /// Hardware gain range in dB, if the device exposes a gain control.
    fn gain_range(&self) -> Option<RangeInclusive<f32>> {
        None
    }

    /// Apply a hardware gain in dB. Only called when [`gain_range`](Self::gain_range)
    /// returns a range.
    fn set_gain_db(&mut self, _db: f32) {}

    /// Flush and release the device.
    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}
