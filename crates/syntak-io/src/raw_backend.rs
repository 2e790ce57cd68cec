//! Raw PCM byte-stream output.
//!
//! Writes serialized 16-bit mono samples to stdout or a file in the format's
//! byte order:
//!
//! ```text
//! syntak play --raw - | aplay -f S16_BE -r 44100 -c 1
//! ```
//!
//! A file never blocks, so sinks opened by [`RawPcmOutput`] pace themselves
//! against the wall clock, staying at most [`PACE_LEAD`] ahead of real time.

use crate::backend::{AudioOutput, PcmSink};
use crate::pcm::{ByteOrder, PcmFormat, encode_bytes};
use crate::{Error, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// How far ahead of real time a paced sink may run.
pub const PACE_LEAD: Duration = Duration::from_millis(50);

/// Where raw bytes go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawTarget {
    /// Process standard output.
    Stdout,
    /// A file, truncated on each open.
    File(PathBuf),
}

impl RawTarget {
    /// `"-"` means stdout, anything else is a file path.
    pub fn parse(spec: &str) -> Self {
        if spec == "-" {
            RawTarget::Stdout
        } else {
            RawTarget::File(PathBuf::from(spec))
        }
    }
}

/// Raw PCM output backend.
#[derive(Debug, Clone)]
pub struct RawPcmOutput {
    target: RawTarget,
}

impl RawPcmOutput {
    /// Create a backend writing to `target`.
    pub fn new(target: RawTarget) -> Self {
        Self { target }
    }

    /// Configured target.
    pub fn target(&self) -> &RawTarget {
        &self.target
    }
}

impl AudioOutput for RawPcmOutput {
    fn name(&self) -> &str {
        "raw"
    }

    fn open(&self, format: &PcmFormat) -> Result<Box<dyn PcmSink>> {
        let writer: Box<dyn Write + Send> = match &self.target {
            RawTarget::Stdout => Box::new(std::io::stdout()),
            RawTarget::File(path) => {
                let file = File::create(path).map_err(|e| {
                    Error::DeviceUnavailable(format!("{}: {}", path.display(), e))
                })?;
                Box::new(BufWriter::new(file))
            }
        };
        tracing::info!(
            target_kind = ?self.target,
            byte_order = ?format.byte_order,
            sample_rate = format.sample_rate,
            "raw PCM stream opened"
        );
        Ok(Box::new(
            RawPcmSink::new(writer, format.byte_order).paced(format.sample_rate),
        ))
    }
}

/// Open raw byte stream.
pub struct RawPcmSink<W: Write + Send> {
    writer: Option<W>,
    byte_order: ByteOrder,
    pacer: Option<Pacer>,
}

impl<W: Write + Send> RawPcmSink<W> {
    /// Wrap any writer. Writes are not paced.
    pub fn new(writer: W, byte_order: ByteOrder) -> Self {
        Self {
            writer: Some(writer),
            byte_order,
            pacer: None,
        }
    }

    /// Pace writes to `sample_rate` frames per second of wall time.
    pub fn paced(mut self, sample_rate: u32) -> Self {
        self.pacer = Some(Pacer::new(sample_rate));
        self
    }

    /// Recover the writer, flushing nothing.
    pub fn into_inner(self) -> Option<W> {
        self.writer
    }
}

impl<W: Write + Send> PcmSink for RawPcmSink<W> {
    fn write(&mut self, block: &[i16]) -> Result<()> {
        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| Error::DeviceWrite("stream closed".into()))?;
        writer
            .write_all(&encode_bytes(block, self.byte_order))
            .map_err(|e| Error::DeviceWrite(e.to_string()))?;
        if let Some(pacer) = &mut self.pacer {
            pacer.advance(block.len());
        }
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        if let Some(mut writer) = self.writer.take() {
            writer
                .flush()
                .map_err(|e| Error::DeviceWrite(e.to_string()))?;
        }
        Ok(())
    }
}

/// Wall-clock stand-in for a device buffer.
#[derive(Debug)]
struct Pacer {
    started: Instant,
    frames: u64,
    sample_rate: f64,
}

impl Pacer {
    fn new(sample_rate: u32) -> Self {
        Self {
            started: Instant::now(),
            frames: 0,
            sample_rate: f64::from(sample_rate.max(1)),
        }
    }

    /// Account for `frames` more frames, sleeping while too far ahead.
    fn advance(&mut self, frames: usize) {
        self.frames += frames as u64;
        let written = Duration::from_secs_f64(self.frames as f64 / self.sample_rate);
        let elapsed = self.started.elapsed();
        if written > elapsed + PACE_LEAD {
            std::thread::sleep(written - elapsed - PACE_LEAD);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_big_endian_bytes() {
        let mut sink = RawPcmSink::new(Vec::new(), ByteOrder::Big);
        sink.write(&[1, -1]).unwrap();
        sink.write(&[0x0102]).unwrap();
        let bytes = sink.into_inner().unwrap();
        assert_eq!(bytes, [0x00, 0x01, 0xFF, 0xFF, 0x01, 0x02]);
    }

    #[test]
    fn test_write_after_close_fails() {
        let mut sink = RawPcmSink::new(Vec::new(), ByteOrder::Little);
        sink.close().unwrap();
        assert!(matches!(sink.write(&[0]), Err(Error::DeviceWrite(_))));
    }

    #[test]
    fn test_paced_sink_tracks_real_time() {
        let mut sink = RawPcmSink::new(std::io::sink(), ByteOrder::Big).paced(10_000);
        let start = Instant::now();
        // 2000 frames at 10 kHz is 200 ms of audio.
        for _ in 0..20 {
            sink.write(&[0; 100]).unwrap();
        }
        assert!(start.elapsed() >= Duration::from_millis(200) - PACE_LEAD);
    }

    #[test]
    fn test_target_parse() {
        assert_eq!(RawTarget::parse("-"), RawTarget::Stdout);
        assert_eq!(
            RawTarget::parse("out.pcm"),
            RawTarget::File(PathBuf::from("out.pcm"))
        );
    }

    #[test]
    fn test_open_file_target() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tone.pcm");
        let output = RawPcmOutput::new(RawTarget::File(path.clone()));
        let mut sink = output.open(&PcmFormat::default()).unwrap();
        sink.write(&[0x7FFF, 0]).unwrap();
        sink.close().unwrap();
        assert_eq!(std::fs::read(path).unwrap(), [0x7F, 0xFF, 0x00, 0x00]);
    }

    #[test]
    fn test_open_missing_dir_is_unavailable() {
        let output = RawPcmOutput::new(RawTarget::File(PathBuf::from(
            "/nonexistent-syntak-dir/out.pcm",
        )));
        assert!(matches!(
            output.open(&PcmFormat::default()),
            Err(Error::DeviceUnavailable(_))
        ));
    }
}
