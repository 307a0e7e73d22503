use clap::{ArgAction, Parser};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "dropscan", about = "Find and optionally cut out dropouts in mono WAV files")]
pub struct Cli {
    /// Input WAV file (must be mono)
    pub input: PathBuf,

    /// Minimum dropout duration in milliseconds
    #[arg(short, long, default_value_t = 10.0)]
    pub min_duration: f64,

    /// Silence threshold in dBFS; values above 0 are clamped to 0
    #[arg(short, long, default_value_t = -80.0, allow_negative_numbers = true)]
    pub threshold: f32,

    /// Write a copy of the input with every detected dropout removed
    #[arg(short, long)]
    pub fix: bool,

    /// Where to write the repaired copy; implies --fix
    /// (default with --fix alone: <input>-fixed.wav)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Overwrite the output file if it already exists
    #[arg(long)]
    pub force: bool,

    /// Write a JSON report of the scan to this file
    #[arg(long)]
    pub json: Option<PathBuf>,

    /// Do not display a progress bar
    #[arg(long)]
    pub no_progress: bool,

    /// More diagnostic output (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Threshold actually used for the scan. 0 dBFS is full scale, so
    /// anything above it is clamped down with a warning.
    pub fn effective_threshold(&self) -> f32 {
        if self.threshold > 0.0 {
            log::warn!(
                "threshold {} dBFS is above full scale, clamping to 0",
                self.threshold
            );
            0.0
        } else {
            self.threshold
        }
    }
}
