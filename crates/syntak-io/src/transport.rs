//! Playback transport: Stopped ⇄ Playing.
//!
//! ```text
//!            start() / open device, spawn loop
//!  Stopped ────────────────────────────────────▶ Playing
//!     ▲                                             │
//!     │  stop() / flag, join, device closed         │
//!     └─────────────────────────────────────────────┤
//!     ▲                                             │
//!     └──── write error / loop exits, device closed ┘
//! ```
//!
//! Exactly one generation thread exists while playing. It owns the audible
//! [`Renderer`] and hands it back through its join handle, so the audible
//! phase carries over a stop/start cycle. `stop()` joins the thread before it
//! returns; the loop checks its flag once per block, bounding stop latency to
//! one block of playback.

use crate::backend::{AudioOutput, PcmSink};
use crate::pcm::{PcmFormat, encode_block};
use crate::{Error, Result};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::JoinHandle;
use syntak_synth::gain::volume_to_db;
use syntak_synth::{ParamId, Renderer, SynthParams};

/// Default samples per generation block.
pub const DEFAULT_BLOCK_SIZE: usize = 2048;

/// Transport state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportState {
    /// No generation thread, no open device.
    Stopped,
    /// Generation thread running with an open device.
    Playing,
}

struct Worker {
    running: Arc<AtomicBool>,
    handle: JoinHandle<Renderer>,
}

/// Owns the generation thread and the device lifecycle.
pub struct Transport {
    output: Arc<dyn AudioOutput>,
    params: Arc<SynthParams>,
    format: PcmFormat,
    block_size: usize,
    /// Audible renderer while stopped; moved into the worker while playing.
    renderer: Option<Renderer>,
    worker: Option<Worker>,
}

impl Transport {
    /// Create a stopped transport.
    ///
    /// `block_size` is clamped to at least 1.
    pub fn new(
        output: Arc<dyn AudioOutput>,
        params: Arc<SynthParams>,
        format: PcmFormat,
        block_size: usize,
    ) -> Self {
        Self {
            output,
            params,
            format,
            block_size: block_size.max(1),
            renderer: Some(Renderer::with_sample_rate(f64::from(format.sample_rate))),
            worker: None,
        }
    }

    /// Output backend name.
    pub fn backend_name(&self) -> &str {
        self.output.name()
    }

    /// Samples per block.
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Stream format.
    pub fn format(&self) -> PcmFormat {
        self.format
    }

    /// Current state. A loop that died on a write error reads as stopped.
    pub fn state(&self) -> TransportState {
        match &self.worker {
            Some(w) if w.running.load(Ordering::Acquire) => TransportState::Playing,
            _ => TransportState::Stopped,
        }
    }

    /// `true` while playing.
    pub fn is_playing(&self) -> bool {
        self.state() == TransportState::Playing
    }

    /// Open the device and start the generation loop.
    ///
    /// A no-op while already playing. If the device cannot be opened the
    /// error is logged and returned, and the transport stays stopped.
    pub fn start(&mut self) -> Result<()> {
        if self.is_playing() {
            tracing::debug!("start ignored, already playing");
            return Ok(());
        }
        // A loop that ended on its own still has to be joined.
        self.reap();

        let mut sink = match self.output.open(&self.format) {
            Ok(sink) => sink,
            Err(err) => {
                tracing::error!(backend = self.output.name(), %err, "audio device unavailable");
                return Err(err);
            }
        };

        let running = Arc::new(AtomicBool::new(true));
        sink.watch_running(Arc::clone(&running));
        let renderer = self
            .renderer
            .take()
            .unwrap_or_else(|| Renderer::with_sample_rate(f64::from(self.format.sample_rate)));
        let generation = GenerationLoop {
            sink,
            renderer,
            params: Arc::clone(&self.params),
            running: Arc::clone(&running),
            block_size: self.block_size,
        };

        let handle = std::thread::Builder::new()
            .name("syntak-generation".into())
            .spawn(move || generation.run())
            .map_err(|err| {
                tracing::error!(%err, "failed to spawn generation thread");
                Error::Spawn(err)
            })?;

        self.worker = Some(Worker { running, handle });
        tracing::info!(
            backend = self.output.name(),
            block_size = self.block_size,
            sample_rate = self.format.sample_rate,
            "transport started"
        );
        Ok(())
    }

    /// Signal the loop to exit after its current write and wait for it.
    ///
    /// The device is closed by the time this returns. A no-op while stopped.
    pub fn stop(&mut self) {
        if let Some(worker) = &self.worker {
            worker.running.store(false, Ordering::Release);
        }
        if self.reap() {
            tracing::info!("transport stopped");
        }
    }

    /// Join a finished or stopping worker and recover its renderer.
    fn reap(&mut self) -> bool {
        let Some(worker) = self.worker.take() else {
            return false;
        };
        worker.running.store(false, Ordering::Release);
        match worker.handle.join() {
            Ok(renderer) => self.renderer = Some(renderer),
            Err(_) => {
                tracing::error!("generation thread panicked");
                self.renderer = None;
            }
        }
        true
    }
}

impl Drop for Transport {
    fn drop(&mut self) {
        self.stop();
    }
}

/// State moved onto the generation thread.
struct GenerationLoop {
    sink: Box<dyn PcmSink>,
    renderer: Renderer,
    params: Arc<SynthParams>,
    running: Arc<AtomicBool>,
    block_size: usize,
}

impl GenerationLoop {
    fn run(mut self) -> Renderer {
        let mut block = vec![0.0f32; self.block_size];
        let mut pcm = vec![0i16; self.block_size];
        let gain_range = self.sink.gain_range();
        let mut applied_volume = None;

        while self.running.load(Ordering::Acquire) {
            if let Some(range) = &gain_range {
                let volume = self.params.get(ParamId::Volume);
                if applied_volume != Some(volume) {
                    let db = volume_to_db(
                        volume,
                        f64::from(*range.start()),
                        f64::from(*range.end()),
                    ) as f32;
                    tracing::trace!(volume, db, "device gain");
                    self.sink.set_gain_db(db);
                    applied_volume = Some(volume);
                }
            }

            self.renderer.render_into(&self.params, &mut block);
            encode_block(&block, &mut pcm);

            if let Err(err) = self.sink.write(&pcm) {
                tracing::error!(%err, "device write failed, stopping playback");
                self.running.store(false, Ordering::Release);
                break;
            }
        }

        if let Err(err) = self.sink.close() {
            tracing::warn!(%err, "device close failed");
        }
        self.renderer
    }
}
