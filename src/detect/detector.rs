//! Chunked dropout detection.
//!
//! The signal is scanned in fixed-size windows. A silent run that touches
//! the end of a window stays open as a carry and is merged with whatever
//! silence starts the next window, so the reported events are identical
//! for every window size, including a single window spanning the whole
//! signal.

use log::{debug, trace};

use super::predicate::SilencePredicate;
use super::scan;
use super::{DetectError, DetectionListener, Dropout};

/// Default scanning window, in samples.
pub const CHUNK_SIZE: usize = 65536;

/// Finds runs of silent samples at least a configured duration long.
#[derive(Debug, Clone)]
pub struct DropoutDetector {
    predicate: SilencePredicate,
    min_duration_samples: usize,
    chunk_size: usize,
}

impl DropoutDetector {
    /// Build a detector for a signal at `sample_rate` Hz. Runs quieter
    /// than `threshold_db` dBFS and at least `min_duration_ms` long are
    /// reported. The duration is rounded to whole samples and never goes
    /// below one sample.
    pub fn new(
        sample_rate: u32,
        threshold_db: f32,
        min_duration_ms: f64,
    ) -> Result<Self, DetectError> {
        if sample_rate == 0 {
            return Err(DetectError::ZeroSampleRate);
        }
        if !(min_duration_ms.is_finite() && min_duration_ms > 0.0) {
            return Err(DetectError::InvalidMinDuration(min_duration_ms));
        }

        let min_duration_samples =
            ((sample_rate as f64 * min_duration_ms / 1000.0).round() as usize).max(1);
        debug!(
            "minimum dropout duration {min_duration_ms} ms -> {min_duration_samples} samples at {sample_rate} Hz"
        );

        Ok(DropoutDetector {
            predicate: SilencePredicate::from_db(threshold_db),
            min_duration_samples,
            chunk_size: CHUNK_SIZE,
        })
    }

    /// Override the scanning window size. Any size of at least one sample
    /// yields the same events; this mostly exists so tests can force runs
    /// across window boundaries.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    pub fn min_duration_samples(&self) -> usize {
        self.min_duration_samples
    }

    /// Scan `samples` and return every dropout in ascending position
    /// order. The listener sees each event as it is found, plus one
    /// progress tick per window.
    pub fn detect(
        &self,
        samples: &[f32],
        listener: &mut impl DetectionListener,
    ) -> Vec<Dropout> {
        let total = samples.len();
        let mut dropouts = Vec::new();
        // Length of the silent run still open at the window boundary.
        let mut carry = 0usize;

        for (index, chunk) in samples.chunks(self.chunk_size).enumerate() {
            let pos = index * self.chunk_size;
            let lead = scan::count_leading_silence(chunk, &self.predicate);

            if lead == chunk.len() {
                carry += lead;
                trace!("chunk at {pos}: fully silent, carry now {carry}");
            } else {
                let merged = carry + lead;
                if merged >= self.min_duration_samples {
                    emit(
                        &mut dropouts,
                        listener,
                        Dropout {
                            position: pos - carry,
                            duration: merged,
                        },
                    );
                }
                for run in scan::inner_silence_runs(chunk, &self.predicate) {
                    if run.len >= self.min_duration_samples {
                        emit(
                            &mut dropouts,
                            listener,
                            Dropout {
                                position: pos + run.start,
                                duration: run.len,
                            },
                        );
                    }
                }
                carry = scan::count_trailing_silence(chunk, &self.predicate);
                trace!("chunk at {pos}: lead {lead}, trail {carry}");
            }

            listener.on_progress(pos + chunk.len(), total);
        }

        // A run still open at the end of the signal ends with it.
        if carry >= self.min_duration_samples {
            emit(
                &mut dropouts,
                listener,
                Dropout {
                    position: total - carry,
                    duration: carry,
                },
            );
        }

        dropouts
    }
}

fn emit(dropouts: &mut Vec<Dropout>, listener: &mut impl DetectionListener, dropout: Dropout) {
    debug!("dropout at {} for {} samples", dropout.position, dropout.duration);
    listener.on_dropout(dropout);
    dropouts.push(dropout);
}
