//! WAV export and import.
//!
//! Offline renders are written as 16-bit integer PCM through the same
//! quantizer the live stream uses, so a file holds exactly the samples the
//! device would have received.

use crate::Result;
use crate::pcm::to_i16;
use hound::{SampleFormat, WavReader, WavWriter};
use std::path::Path;

/// WAV file specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavSpec {
    /// Number of audio channels.
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bit depth per sample.
    pub bits_per_sample: u16,
}

impl Default for WavSpec {
    fn default() -> Self {
        Self {
            channels: 1,
            sample_rate: 44100,
            bits_per_sample: 16,
        }
    }
}

impl From<hound::WavSpec> for WavSpec {
    fn from(spec: hound::WavSpec) -> Self {
        Self {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
        }
    }
}

impl WavSpec {
    /// Duration in seconds of `frames` frames.
    pub fn duration_of(&self, frames: usize) -> f64 {
        frames as f64 / f64::from(self.sample_rate.max(1))
    }
}

/// Write mono samples in `[-1, 1]` as 16-bit PCM.
///
/// Every frame carries the same sample on all `spec.channels` channels. The
/// bit depth in `spec` is ignored; output is always 16-bit.
pub fn write_wav<P: AsRef<Path>>(path: P, samples: &[f32], spec: WavSpec) -> Result<()> {
    let hound_spec = hound::WavSpec {
        channels: spec.channels.max(1),
        sample_rate: spec.sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let mut writer = WavWriter::create(path, hound_spec)?;

    for &sample in samples {
        let value = to_i16(sample);
        for _ in 0..hound_spec.channels {
            writer.write_sample(value)?;
        }
    }

    writer.finalize()?;
    Ok(())
}

/// Read a WAV file as mono f32 samples along with its spec.
///
/// Multi-channel files are mixed down by averaging channels.
pub fn read_wav<P: AsRef<Path>>(path: P) -> Result<(Vec<f32>, WavSpec)> {
    let reader = WavReader::open(path)?;
    let spec = WavSpec::from(reader.spec());
    let channels = usize::from(spec.channels.max(1));

    let samples: Vec<f32> = match reader.spec().sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<std::result::Result<Vec<_>, _>>()?,
        SampleFormat::Int => {
            let max_val = ((1i64 << (spec.bits_per_sample - 1)) - 1) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| (v as f32 / max_val).max(-1.0)))
                .collect::<std::result::Result<Vec<_>, _>>()?
        }
    };

    let mono = if channels > 1 {
        samples
            .chunks(channels)
            .map(|chunk| chunk.iter().sum::<f32>() / channels as f32)
            .collect()
    } else {
        samples
    };

    Ok((mono, spec))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_spec() {
        let spec = WavSpec::default();
        assert_eq!(spec.channels, 1);
        assert_eq!(spec.sample_rate, 44100);
        assert_eq!(spec.bits_per_sample, 16);
        assert_eq!(spec.duration_of(22050), 0.5);
    }

    #[test]
    fn test_write_read_mono() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tone.wav");
        let samples = [0.0, 0.5, -0.5, 1.0, -1.0];
        write_wav(&path, &samples, WavSpec::default()).unwrap();

        let (read, spec) = read_wav(&path).unwrap();
        assert_eq!(spec, WavSpec::default());
        assert_eq!(read.len(), samples.len());
        for (a, b) in samples.iter().zip(&read) {
            assert!((a - b).abs() < 1.0 / 32767.0, "{a} vs {b}");
        }
    }

    #[test]
    fn test_stereo_duplicates_and_mixes_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stereo.wav");
        let spec = WavSpec {
            channels: 2,
            ..Default::default()
        };
        write_wav(&path, &[0.25, -0.25], spec).unwrap();

        let (read, read_spec) = read_wav(&path).unwrap();
        assert_eq!(read_spec.channels, 2);
        assert_eq!(read.len(), 2);
        assert!((read[0] - 0.25).abs() < 1e-4);
    }

    #[test]
    fn test_out_of_range_samples_clip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("clip.wav");
        write_wav(&path, &[4.0, -4.0], WavSpec::default()).unwrap();
        let (read, _) = read_wav(&path).unwrap();
        assert_eq!(read, [1.0, -1.0]);
    }

    #[test]
    fn test_read_clamps_most_negative_code() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("foreign.wav");
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 44100,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut writer = WavWriter::create(&path, spec).unwrap();
        writer.write_sample(i16::MIN).unwrap();
        writer.write_sample(i16::MAX).unwrap();
        writer.finalize().unwrap();

        let (read, _) = read_wav(&path).unwrap();
        assert_eq!(read, [-1.0, 1.0]);
    }

    #[test]
    fn test_read_missing_file_fails() {
        assert!(read_wav("/nonexistent-syntak/missing.wav").is_err());
    }
}
