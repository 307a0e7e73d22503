//! WAV loading and writing for single-channel tracks.

use std::path::{Path, PathBuf};

use log::debug;
use thiserror::Error;
use wavers::{Wav, WaversError};

use crate::detect::Dropout;

#[derive(Debug, Error)]
pub enum WavError {
    #[error(transparent)]
    Format(#[from] WaversError),
    #[error("expected a mono file, got {0} channels")]
    NotMono(u16),
    #[error("invalid sample rate {0} Hz")]
    BadSampleRate(i32),
    #[error("{} already exists, pass --force to overwrite", .0.display())]
    AlreadyExists(PathBuf),
}

/// A fully decoded mono signal.
pub struct MonoTrack {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

/// Decode `path` into float samples. Multi-channel files are rejected
/// rather than downmixed.
pub fn load_mono(path: &Path) -> Result<MonoTrack, WavError> {
    let mut wav = Wav::<f32>::from_path(path)?;

    let channels = wav.n_channels();
    if channels != 1 {
        return Err(WavError::NotMono(channels));
    }
    let sample_rate = wav.sample_rate();
    if sample_rate <= 0 {
        return Err(WavError::BadSampleRate(sample_rate));
    }

    let samples = wav.read()?.to_vec();
    debug!(
        "loaded {} samples at {sample_rate} Hz from {}",
        samples.len(),
        path.display()
    );

    Ok(MonoTrack {
        samples,
        sample_rate: sample_rate as u32,
    })
}

pub fn write_mono(path: &Path, samples: &[f32], sample_rate: u32) -> Result<(), WavError> {
    wavers::write(path, samples, sample_rate as i32, 1)?;
    debug!("wrote {} samples to {}", samples.len(), path.display());
    Ok(())
}

/// Refuses to clobber an existing file unless the caller asked for it.
pub fn ensure_overwritable(path: &Path, force: bool) -> Result<(), WavError> {
    if !force && path.exists() {
        return Err(WavError::AlreadyExists(path.to_path_buf()));
    }
    Ok(())
}

/// Default output path for a repaired copy: `take.wav` becomes
/// `take-fixed.wav`, next to the input.
pub fn fixed_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy())
        .unwrap_or_default();
    let name = match input.extension() {
        Some(ext) => format!("{stem}-fixed.{}", ext.to_string_lossy()),
        None => format!("{stem}-fixed"),
    };
    input.with_file_name(name)
}

/// Copy `samples` with every dropout range cut out, splicing the audio
/// around it back together. `dropouts` must be ascending and disjoint,
/// as the detector reports them.
pub fn remove_dropouts(samples: &[f32], dropouts: &[Dropout]) -> Vec<f32> {
    let removed: usize = dropouts.iter().map(|dropout| dropout.duration).sum();
    let mut kept = Vec::with_capacity(samples.len() - removed);

    let mut cursor = 0;
    for dropout in dropouts {
        kept.extend_from_slice(&samples[cursor..dropout.position]);
        cursor = dropout.end();
    }
    kept.extend_from_slice(&samples[cursor..]);
    kept
}
