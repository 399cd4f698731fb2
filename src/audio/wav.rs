//! WAV decoding, slicing, and clip export.

use crate::error::{MouthtrackError, Result};
use crate::timeline::segment::SpeechClip;
use std::io::Read;
use std::path::Path;

/// A decoded mono 16-bit track.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioTrack {
    samples: Vec<i16>,
    sample_rate: u32,
}

/// A contiguous piece of a track, cut on millisecond boundaries.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioClip {
    pub start_ms: u64,
    pub end_ms: u64,
    samples: Vec<i16>,
    sample_rate: u32,
}

impl AudioTrack {
    /// Wrap raw mono samples.
    ///
    /// # Errors
    /// `AudioDecode` if `sample_rate` is zero.
    pub fn from_samples(samples: Vec<i16>, sample_rate: u32) -> Result<Self> {
        if sample_rate == 0 {
            return Err(MouthtrackError::AudioDecode {
                message: "sample rate must be positive".to_string(),
            });
        }
        Ok(Self {
            samples,
            sample_rate,
        })
    }

    /// Decode WAV data from any reader. Multi-channel audio is averaged to
    /// mono; 8/24/32-bit and float samples are scaled to 16-bit so silence
    /// thresholds mean the same for every sample width.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut wav_reader =
            hound::WavReader::new(reader).map_err(|e| decode_error("parse WAV file", e))?;

        let spec = wav_reader.spec();
        let channels = usize::from(spec.channels);
        if channels == 0 {
            return Err(MouthtrackError::AudioDecode {
                message: "WAV file declares zero channels".to_string(),
            });
        }

        let interleaved: Vec<i16> = match (spec.sample_format, spec.bits_per_sample) {
            (hound::SampleFormat::Int, 16) => wav_reader
                .samples::<i16>()
                .collect::<std::result::Result<Vec<_>, _>>()
                .map_err(|e| decode_error("read WAV samples", e))?,
            (hound::SampleFormat::Int, bits) if bits < 16 => {
                let shift = 16 - u32::from(bits);
                wav_reader
                    .samples::<i16>()
                    .map(|s| s.map(|v| (i32::from(v) << shift) as i16))
                    .collect::<std::result::Result<Vec<_>, _>>()
                    .map_err(|e| decode_error("read WAV samples", e))?
            }
            (hound::SampleFormat::Int, bits) => {
                let shift = u32::from(bits) - 16;
                wav_reader
                    .samples::<i32>()
                    .map(|s| s.map(|v| (v >> shift) as i16))
                    .collect::<std::result::Result<Vec<_>, _>>()
                    .map_err(|e| decode_error("read WAV samples", e))?
            }
            (hound::SampleFormat::Float, _) => wav_reader
                .samples::<f32>()
                .map(|s| s.map(|v| (v.clamp(-1.0, 1.0) * f32::from(i16::MAX)) as i16))
                .collect::<std::result::Result<Vec<_>, _>>()
                .map_err(|e| decode_error("read WAV samples", e))?,
        };

        let samples = if channels == 1 {
            interleaved
        } else {
            interleaved
                .chunks_exact(channels)
                .map(|frame| {
                    let sum: i32 = frame.iter().map(|&s| i32::from(s)).sum();
                    (sum / channels as i32) as i16
                })
                .collect()
        };

        Self::from_samples(samples, spec.sample_rate)
    }

    /// Decode a WAV file.
    pub fn open(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Track length in whole milliseconds, rounded to nearest.
    pub fn duration_ms(&self) -> u64 {
        let rate = u64::from(self.sample_rate);
        (self.samples.len() as u64 * 1000 + rate / 2) / rate
    }

    pub fn duration_seconds(&self) -> f64 {
        self.samples.len() as f64 / f64::from(self.sample_rate)
    }

    /// Sample index at `ms`, clamped to the track length.
    pub fn sample_index(&self, ms: u64) -> usize {
        let index = ms * u64::from(self.sample_rate) / 1000;
        (index as usize).min(self.samples.len())
    }

    /// Copy out `[start_ms, end_ms)`. Out-of-range bounds are clamped.
    pub fn slice(&self, start_ms: u64, end_ms: u64) -> AudioClip {
        let start = self.sample_index(start_ms);
        let end = self.sample_index(end_ms).max(start);
        AudioClip {
            start_ms,
            end_ms,
            samples: self.samples[start..end].to_vec(),
            sample_rate: self.sample_rate,
        }
    }
}

impl AudioClip {
    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Write the clip as 16-bit mono WAV.
    pub fn export_wav(&self, path: &Path) -> Result<()> {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: self.sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(path, spec).map_err(|e| export_error(path, e))?;
        for &sample in &self.samples {
            writer.write_sample(sample).map_err(|e| export_error(path, e))?;
        }
        writer.finalize().map_err(|e| export_error(path, e))
    }
}

impl SpeechClip for AudioClip {
    fn duration_seconds(&self) -> f64 {
        self.samples.len() as f64 / f64::from(self.sample_rate)
    }
}

fn decode_error(action: &str, e: hound::Error) -> MouthtrackError {
    MouthtrackError::AudioDecode {
        message: format!("Failed to {}: {}", action, e),
    }
}

fn export_error(path: &Path, e: hound::Error) -> MouthtrackError {
    MouthtrackError::AudioExport {
        message: format!("{}: {}", path.display(), e),
    }
}
