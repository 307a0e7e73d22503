use std::path::Path;

use anyhow::Context;
use serde::Serialize;
use serde_json::{json, to_string_pretty};

use crate::detect::Dropout;
use crate::output;

/// One dropout in the report, in both seconds and sample positions.
#[derive(Serialize)]
pub struct DropoutSegment {
    pub start: f64,
    pub end: f64,
    pub duration: f64,
    #[serde(rename = "startSample")]
    pub start_sample: usize,
    #[serde(rename = "endSample")]
    pub end_sample: usize,
    #[serde(rename = "durationSamples")]
    pub duration_samples: usize,
}

impl DropoutSegment {
    pub fn from_dropout(dropout: &Dropout, sample_rate: u32) -> Self {
        Self {
            start: dropout.position as f64 / sample_rate as f64,
            end: dropout.end() as f64 / sample_rate as f64,
            duration: dropout.duration as f64 / sample_rate as f64,
            start_sample: dropout.position,
            end_sample: dropout.end(),
            duration_samples: dropout.duration,
        }
    }
}

/// Everything a scan produced, plus the settings that produced it.
pub struct ScanReport<'a> {
    pub input: &'a Path,
    pub sample_rate: u32,
    pub total_samples: usize,
    pub threshold_db: f32,
    pub min_duration_ms: f64,
    pub min_duration_samples: usize,
    pub dropouts: &'a [Dropout],
}

impl ScanReport<'_> {
    pub fn write(&self, path: &Path) -> anyhow::Result<()> {
        let dropouts: Vec<DropoutSegment> = self
            .dropouts
            .iter()
            .map(|dropout| DropoutSegment::from_dropout(dropout, self.sample_rate))
            .collect();

        let report = json!({
            "input": self.input.display().to_string(),
            "sampleRate": self.sample_rate,
            "totalSamples": self.total_samples,
            "thresholdDb": self.threshold_db,
            "minDurationMs": self.min_duration_ms,
            "minDurationSamples": self.min_duration_samples,
            "dropouts": dropouts,
        });

        std::fs::write(path, to_string_pretty(&report)?)
            .with_context(|| format!("could not write JSON report to {}", path.display()))?;

        output!("Wrote JSON report to {}", path.display());
        Ok(())
    }
}
