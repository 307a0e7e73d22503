use thiserror::Error;

pub mod detector;
pub mod predicate;
pub mod scan;

pub use detector::DropoutDetector;

/// A silent run long enough to be reported, in absolute sample
/// coordinates of the whole signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dropout {
    pub position: usize,
    pub duration: usize,
}

impl Dropout {
    /// Index of the first sample after the run.
    pub fn end(&self) -> usize {
        self.position + self.duration
    }
}

#[derive(Debug, Error)]
pub enum DetectError {
    #[error("sample rate must be positive")]
    ZeroSampleRate,
    #[error("minimum dropout duration must be a positive number of milliseconds, got {0}")]
    InvalidMinDuration(f64),
}

/// Observer for one detection run. Both methods default to no-ops so a
/// listener only implements what it cares about.
pub trait DetectionListener {
    fn on_dropout(&mut self, _dropout: Dropout) {}

    /// Called once per scanned chunk with the number of samples processed
    /// so far and the signal length.
    fn on_progress(&mut self, _processed: usize, _total: usize) {}
}
