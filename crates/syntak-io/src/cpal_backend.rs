//! cpal-based audio output.
//!
//! cpal drives output through a pull callback on its own audio thread, while
//! the transport pushes blocks. [`CpalSink`] bridges the two with a bounded
//! channel of blocks: `write()` parks while the channel is full, and the
//! callback drains it, so the device clock paces the generation loop.
//!
//! The device stream runs in `f32` at the device's default channel count; the
//! mono signal is copied to every channel. Samples cross the channel as host
//! order `i16`, so byte order never applies on this path.

use crate::backend::{AudioOutput, PcmSink};
use crate::pcm::{PcmFormat, to_f32};
use crate::{Error, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, Host, Stream};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, SyncSender, TrySendError};
use std::time::Duration;

/// Blocks queued between the generation loop and the device callback.
const QUEUE_BLOCKS: usize = 2;

/// How long a blocked `write()` sleeps before retrying.
const WRITE_POLL: Duration = Duration::from_millis(2);

/// Extract device name via `description()` (cpal 0.17+).
pub(crate) fn device_name(device: &Device) -> std::result::Result<String, cpal::DeviceNameError> {
    device.description().map(|d| d.name().to_string())
}

/// Output device information.
#[derive(Debug, Clone)]
pub struct AudioDevice {
    /// Human-readable device name.
    pub name: String,
    /// Default sample rate in Hz.
    pub default_sample_rate: u32,
    /// Default channel count.
    pub channels: u16,
    /// Whether this is the host's default output.
    pub is_default: bool,
}

fn describe(device: &Device, default_name: Option<&str>) -> Option<AudioDevice> {
    let name = device_name(device).ok()?;
    let config = device.default_output_config().ok();
    Some(AudioDevice {
        is_default: default_name == Some(name.as_str()),
        name,
        default_sample_rate: config.as_ref().map(|c| c.sample_rate()).unwrap_or(44100),
        channels: config.as_ref().map(|c| c.channels()).unwrap_or(2),
    })
}

/// List output devices on the default host.
pub fn list_output_devices() -> Result<Vec<AudioDevice>> {
    let host = cpal::default_host();
    let default_name = host
        .default_output_device()
        .and_then(|d| device_name(&d).ok());
    let devices = host
        .output_devices()
        .map_err(|e| Error::DeviceUnavailable(e.to_string()))?;

    Ok(devices
        .filter_map(|d| describe(&d, default_name.as_deref()))
        .collect())
}

/// The host's default output device, if any.
pub fn default_output_device() -> Option<AudioDevice> {
    let host = cpal::default_host();
    let device = host.default_output_device()?;
    let name = device_name(&device).ok();
    describe(&device, name.as_deref())
}

fn find_output_device(host: &Host, name: Option<&str>) -> Result<Device> {
    match name {
        Some(search) => {
            let search_lower = search.to_lowercase();
            let devices = host
                .output_devices()
                .map_err(|e| Error::DeviceUnavailable(e.to_string()))?;

            for device in devices {
                if let Ok(dev_name) = device_name(&device)
                    && dev_name.to_lowercase().contains(search_lower.as_str())
                {
                    return Ok(device);
                }
            }
            Err(Error::DeviceNotFound(format!(
                "no output device matching '{}'",
                search
            )))
        }
        None => host.default_output_device().ok_or(Error::NoDevice),
    }
}

/// cpal output backend.
///
/// Opens the default output device, or the first device whose name contains
/// `device_name` (case-insensitive).
#[derive(Debug, Clone, Default)]
pub struct CpalOutput {
    device_name: Option<String>,
}

impl CpalOutput {
    /// Backend using the host's default output device.
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend using a name-matched output device.
    pub fn with_device(name: impl Into<String>) -> Self {
        Self {
            device_name: Some(name.into()),
        }
    }
}

impl AudioOutput for CpalOutput {
    fn name(&self) -> &str {
        "cpal"
    }

    fn open(&self, format: &PcmFormat) -> Result<Box<dyn PcmSink>> {
        let host = cpal::default_host();
        let device = find_output_device(&host, self.device_name.as_deref())?;
        let channels = device
            .default_output_config()
            .map(|c| c.channels())
            .map_err(|e| Error::DeviceUnavailable(e.to_string()))?;

        let stream_config = cpal::StreamConfig {
            channels,
            sample_rate: format.sample_rate,
            buffer_size: cpal::BufferSize::Default,
        };

        let (tx, rx) = mpsc::sync_channel::<Vec<i16>>(QUEUE_BLOCKS);
        let failed = Arc::new(AtomicBool::new(false));
        let stream_failed = Arc::clone(&failed);
        let mut feeder = BlockFeeder::new(rx);
        let frame_width = usize::from(channels.max(1));

        let stream = device
            .build_output_stream(
                &stream_config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    feeder.fill(data, frame_width);
                },
                move |err| {
                    tracing::error!(%err, "output stream error");
                    stream_failed.store(true, Ordering::Release);
                },
                None,
            )
            .map_err(|e| Error::DeviceUnavailable(e.to_string()))?;

        stream
            .play()
            .map_err(|e| Error::DeviceUnavailable(e.to_string()))?;

        let name = device_name(&device).unwrap_or_default();
        tracing::info!(
            device = %name,
            channels,
            sample_rate = format.sample_rate,
            "output stream started"
        );

        Ok(Box::new(CpalSink {
            stream: Some(stream),
            tx: Some(tx),
            failed,
            running: None,
        }))
    }
}

/// Open cpal stream fed through a bounded block queue.
pub struct CpalSink {
    stream: Option<Stream>,
    tx: Option<SyncSender<Vec<i16>>>,
    failed: Arc<AtomicBool>,
    /// Transport run flag; a full queue is abandoned once it clears.
    running: Option<Arc<AtomicBool>>,
}

impl CpalSink {
    fn stop_requested(&self) -> bool {
        self.running
            .as_ref()
            .is_some_and(|r| !r.load(Ordering::Acquire))
    }
}

impl PcmSink for CpalSink {
    fn write(&mut self, block: &[i16]) -> Result<()> {
        let tx = self
            .tx
            .as_ref()
            .ok_or_else(|| Error::DeviceWrite("stream closed".into()))?;
        let mut pending = block.to_vec();
        loop {
            if self.failed.load(Ordering::Acquire) {
                return Err(Error::DeviceWrite("output stream reported an error".into()));
            }
            // A stalled callback must not hold up stop(); the block is dropped.
            if self.stop_requested() {
                return Ok(());
            }
            match tx.try_send(pending) {
                Ok(()) => return Ok(()),
                Err(TrySendError::Full(back)) => {
                    pending = back;
                    std::thread::sleep(WRITE_POLL);
                }
                Err(TrySendError::Disconnected(_)) => {
                    return Err(Error::DeviceWrite("output stream disconnected".into()));
                }
            }
        }
    }

    fn watch_running(&mut self, running: Arc<AtomicBool>) {
        self.running = Some(running);
    }

    fn close(&mut self) -> Result<()> {
        self.tx = None;
        if let Some(stream) = self.stream.take() {
            stream
                .pause()
                .map_err(|e| Error::DeviceWrite(e.to_string()))?;
        }
        Ok(())
    }
}

/// Callback-side reader that spreads queued blocks over device buffers.
struct BlockFeeder {
    rx: Receiver<Vec<i16>>,
    current: Vec<i16>,
    pos: usize,
}

impl BlockFeeder {
    fn new(rx: Receiver<Vec<i16>>) -> Self {
        Self {
            rx,
            current: Vec::new(),
            pos: 0,
        }
    }

    fn next_sample(&mut self) -> Option<i16> {
        while self.pos >= self.current.len() {
            self.current = self.rx.try_recv().ok()?;
            self.pos = 0;
        }
        let sample = self.current[self.pos];
        self.pos += 1;
        Some(sample)
    }

    /// Fill an interleaved buffer; underruns play silence.
    fn fill(&mut self, data: &mut [f32], channels: usize) {
        for frame in data.chunks_mut(channels) {
            let value = self.next_sample().map_or(0.0, to_f32);
            frame.fill(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feeder_spreads_blocks_across_channels() {
        let (tx, rx) = mpsc::sync_channel(4);
        let mut feeder = BlockFeeder::new(rx);
        tx.send(vec![32767, 0]).unwrap();
        tx.send(vec![-32767]).unwrap();

        let mut data = [9.0f32; 8];
        feeder.fill(&mut data, 2);
        assert_eq!(data, [1.0, 1.0, 0.0, 0.0, -1.0, -1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_feeder_skips_empty_blocks() {
        let (tx, rx) = mpsc::sync_channel(4);
        let mut feeder = BlockFeeder::new(rx);
        tx.send(Vec::new()).unwrap();
        tx.send(vec![32767]).unwrap();
        assert_eq!(feeder.next_sample(), Some(32767));
        assert_eq!(feeder.next_sample(), None);
    }

    fn detached_sink(queue: usize) -> (CpalSink, Receiver<Vec<i16>>) {
        let (tx, rx) = mpsc::sync_channel(queue);
        let sink = CpalSink {
            stream: None,
            tx: Some(tx),
            failed: Arc::new(AtomicBool::new(false)),
            running: None,
        };
        (sink, rx)
    }

    #[test]
    fn test_full_queue_write_returns_after_stop() {
        // No callback ever drains this queue.
        let (mut sink, _rx) = detached_sink(1);
        let running = Arc::new(AtomicBool::new(true));
        sink.watch_running(Arc::clone(&running));
        sink.write(&[1, 2]).unwrap();

        let stopper = {
            let running = Arc::clone(&running);
            std::thread::spawn(move || {
                std::thread::sleep(Duration::from_millis(20));
                running.store(false, Ordering::Release);
            })
        };
        let started = std::time::Instant::now();
        sink.write(&[3, 4]).unwrap();
        stopper.join().unwrap();
        assert!(started.elapsed() < Duration::from_secs(2));
    }

    #[test]
    fn test_stream_error_fails_blocked_write() {
        let (mut sink, _rx) = detached_sink(1);
        sink.write(&[1]).unwrap();
        sink.failed.store(true, Ordering::Release);
        assert!(matches!(sink.write(&[2]), Err(Error::DeviceWrite(_))));
    }

    #[test]
    fn test_closed_sink_rejects_writes() {
        let (mut sink, _rx) = detached_sink(1);
        sink.close().unwrap();
        assert!(matches!(sink.write(&[1]), Err(Error::DeviceWrite(_))));
    }

    #[test]
    fn test_cpal_output_name() {
        assert_eq!(CpalOutput::new().name(), "cpal");
        assert_eq!(
            CpalOutput::with_device("usb").device_name.as_deref(),
            Some("usb")
        );
    }

    #[test]
    fn test_list_output_devices_does_not_panic() {
        // Availability depends on the machine; only the call path is checked.
        let _ = list_output_devices();
    }
}
