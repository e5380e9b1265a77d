//! Audio file probing for Dolphin
//!
//! Reads WAV metadata (the "metadata loaded" half of a media source) and
//! computes amplitude sequences from WAV sample data for waveform display.
//! Only WAV is decoded; other containers are the host's business.

use std::path::Path;

use hound::{SampleFormat, WavReader};
use serde::Serialize;
use tracing::debug;

use crate::error::{DolphinError, Result};
use crate::waveform::AmplitudeSequence;

/// Metadata of a decoded WAV source
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AudioInfo {
    /// Duration in seconds
    pub duration_secs: f64,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Number of interleaved channels
    pub channels: u16,
    /// Number of frames (samples per channel)
    pub frames: u32,
}

/// Read the metadata of a WAV file without decoding its samples
///
/// # Errors
/// * `FileNotFound` - If the file does not exist
/// * `InvalidAudio` - If the file is not a valid WAV file
/// * `UnsupportedFormat` - If the header reports zero channels or sample rate
pub fn probe_wav(path: &Path) -> Result<AudioInfo> {
    let reader = open_wav(path)?;
    let spec = reader.spec();
    if spec.channels == 0 || spec.sample_rate == 0 {
        return Err(DolphinError::UnsupportedFormat {
            format: format!("{} channels at {} Hz", spec.channels, spec.sample_rate),
        });
    }

    let frames = reader.duration();
    let info = AudioInfo {
        duration_secs: frames as f64 / spec.sample_rate as f64,
        sample_rate: spec.sample_rate,
        channels: spec.channels,
        frames,
    };
    debug!(
        "Probed {}: {:.3}s, {} Hz, {} ch",
        path.display(),
        info.duration_secs,
        info.sample_rate,
        info.channels
    );
    Ok(info)
}

/// Compute a waveform amplitude sequence with `bars` entries from a WAV file
///
/// Each bar holds the peak absolute level of its slice of the (mono-mixed)
/// signal, normalized so the loudest bar is 1.0. A silent file yields all
/// zeros. Files shorter than `bars` frames repeat frames across bars.
///
/// # Errors
/// * `FileNotFound` / `InvalidAudio` / `UnsupportedFormat` - as [`probe_wav`]
/// * `InvalidAudio` - If the file contains no samples
pub fn load_peaks(path: &Path, bars: usize) -> Result<AmplitudeSequence> {
    let reader = open_wav(path)?;
    let spec = reader.spec();
    let channels = spec.channels.max(1) as usize;
    let samples = read_samples_as_f32(reader, spec.bits_per_sample, spec.sample_format)?;

    let mono = mix_to_mono(&samples, channels);
    if mono.is_empty() {
        return Err(DolphinError::InvalidAudio {
            reason: format!("{} contains no samples", path.display()),
            source: None,
        });
    }

    Ok(AmplitudeSequence::from_unclamped(peaks(&mono, bars)))
}

/// Downsample a mono signal into `bars` normalized peak levels
pub fn peaks(mono: &[f32], bars: usize) -> Vec<f32> {
    let frames = mono.len();
    if frames == 0 || bars == 0 {
        return vec![0.0; bars];
    }

    let raw: Vec<f32> = (0..bars)
        .map(|col| {
            let start = (col * frames / bars).min(frames - 1);
            let end = ((col + 1) * frames / bars).clamp(start + 1, frames);
            mono[start..end]
                .iter()
                .fold(0.0f32, |acc, sample| acc.max(sample.abs()))
        })
        .collect();

    let loudest = raw.iter().copied().fold(0.0f32, f32::max);
    if loudest <= 0.0 {
        return raw;
    }
    raw.into_iter().map(|peak| peak / loudest).collect()
}

// ============================================================================
// Internal helper functions
// ============================================================================

fn open_wav(path: &Path) -> Result<WavReader<std::io::BufReader<std::fs::File>>> {
    if !path.exists() {
        return Err(DolphinError::FileNotFound {
            path: path.display().to_string(),
        });
    }

    WavReader::open(path).map_err(|e| DolphinError::InvalidAudio {
        reason: format!("Failed to open WAV file {}: {}", path.display(), e),
        source: Some(e),
    })
}

/// Read samples from WAV reader and convert to f32
fn read_samples_as_f32<R: std::io::Read>(
    mut reader: WavReader<R>,
    bits_per_sample: u16,
    sample_format: SampleFormat,
) -> Result<Vec<f32>> {
    let invalid = |e: hound::Error| DolphinError::InvalidAudio {
        reason: format!("Failed to read {}-bit samples: {}", bits_per_sample, e),
        source: Some(e),
    };

    match (sample_format, bits_per_sample) {
        (SampleFormat::Float, _) => reader
            .samples::<f32>()
            .collect::<std::result::Result<Vec<f32>, _>>()
            .map_err(invalid),
        (SampleFormat::Int, 8) => reader
            .samples::<i8>()
            .map(|s| s.map(|v| v as f32 / 128.0))
            .collect::<std::result::Result<Vec<f32>, _>>()
            .map_err(invalid),
        (SampleFormat::Int, 16) => reader
            .samples::<i16>()
            .map(|s| s.map(|v| v as f32 / 32768.0))
            .collect::<std::result::Result<Vec<f32>, _>>()
            .map_err(invalid),
        // 24-bit stored as i32 in hound
        (SampleFormat::Int, 24) => reader
            .samples::<i32>()
            .map(|s| s.map(|v| v as f32 / 8388608.0))
            .collect::<std::result::Result<Vec<f32>, _>>()
            .map_err(invalid),
        (SampleFormat::Int, 32) => reader
            .samples::<i32>()
            .map(|s| s.map(|v| v as f32 / 2147483648.0))
            .collect::<std::result::Result<Vec<f32>, _>>()
            .map_err(invalid),
        (SampleFormat::Int, bits) => Err(DolphinError::UnsupportedFormat {
            format: format!("{}-bit integer audio", bits),
        }),
    }
}

/// Average interleaved frames down to one channel
fn mix_to_mono(samples: &[f32], channels: usize) -> Vec<f32> {
    if channels == 1 {
        return samples.to_vec();
    }
    samples
        .chunks_exact(channels)
        .map(|frame| frame.iter().sum::<f32>() / channels as f32)
        .collect()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use hound::{WavSpec, WavWriter};
    use tempfile::tempdir;

    fn write_wav(path: &Path, channels: u16, samples: &[i16]) {
        let spec = WavSpec {
            channels,
            sample_rate: 8000,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut writer = WavWriter::create(path, spec).unwrap();
        for &sample in samples {
            writer.write_sample(sample).unwrap();
        }
        writer.finalize().unwrap();
    }

    #[test]
    fn test_probe_duration() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tone.wav");
        write_wav(&path, 2, &vec![1000i16; 8000 * 2 * 3]);

        let info = probe_wav(&path).unwrap();
        assert_eq!(info.sample_rate, 8000);
        assert_eq!(info.channels, 2);
        assert_eq!(info.frames, 24000);
        assert_relative_eq!(info.duration_secs, 3.0);
    }

    #[test]
    fn test_probe_missing_file() {
        let err = probe_wav(Path::new("/nonexistent/nope.wav")).unwrap_err();
        assert_eq!(err.error_code(), "FILE_NOT_FOUND");
    }

    #[test]
    fn test_probe_not_a_wav() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("fake.wav");
        std::fs::write(&path, b"definitely not RIFF").unwrap();

        let err = probe_wav(&path).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_AUDIO");
    }

    #[test]
    fn test_load_peaks_normalizes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ramp.wav");
        // Quiet first half, loud second half
        let mut samples = vec![4000i16; 400];
        samples.extend(vec![16000i16; 400]);
        write_wav(&path, 1, &samples);

        let seq = load_peaks(&path, 4).unwrap();
        assert_eq!(seq.len(), 4);
        assert_relative_eq!(seq.as_slice()[0], 0.25, epsilon = 1e-4);
        assert_relative_eq!(seq.as_slice()[3], 1.0);
    }

    #[test]
    fn test_load_peaks_empty_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.wav");
        write_wav(&path, 1, &[]);

        let err = load_peaks(&path, 10).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_AUDIO");
    }

    #[test]
    fn test_peaks_silence() {
        assert_eq!(peaks(&[0.0; 64], 4), vec![0.0; 4]);
    }

    #[test]
    fn test_peaks_more_bars_than_frames() {
        let levels = peaks(&[0.5, -1.0], 4);
        assert_eq!(levels.len(), 4);
        assert!(levels.iter().all(|l| (0.0..=1.0).contains(l)));
        assert_relative_eq!(levels[3], 1.0);
    }

    #[test]
    fn test_mix_to_mono() {
        let mono = mix_to_mono(&[1.0, 0.0, 0.5, 0.5], 2);
        assert_eq!(mono, vec![0.5, 0.5]);
    }
}
