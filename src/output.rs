use crate::cli::Cli;
use crate::detect::{DetectionListener, Dropout};
use indicatif::{ProgressBar, ProgressStyle};

/// Findings go to stdout so they survive piping; the progress bar lives
/// on stderr.
#[macro_export]
macro_rules! output {
    ($($arg:tt)*) => {
        println!($($arg)*)
    };
}

pub fn fmt_pos(pos: usize, digits: usize) -> String {
    format!("{:0width$}", pos, width = digits)
}

pub fn sample_to_time(sample: usize, sample_rate: u32) -> String {
    let seconds = sample as f64 / sample_rate as f64;
    let hours = (seconds / 3600.0).floor();
    let minutes = ((seconds % 3600.0) / 60.0).floor();
    let secs = seconds % 60.0;
    format!("{:02.0}:{:02.0}:{:06.3}", hours, minutes, secs)
}

#[derive(Debug)]
pub struct Output {
    pub progress_bar: Option<ProgressBar>,
}

impl Output {
    pub fn new(args: &Cli, num_samples: u64) -> Self {
        let progress_bar = if args.no_progress {
            None
        } else {
            Some(ProgressBar::new(num_samples))
        };

        if let Some(pb) = &progress_bar {
            pb.set_style(ProgressStyle::with_template("[{elapsed_precise}] [{wide_bar:.yellow/green}] {percent_precise}% ({pos}/{len})")
                .unwrap()
                .progress_chars("#>-"));
        }

        Self { progress_bar }
    }

    pub fn set_position(&self, pos: u64) {
        if let Some(pb) = &self.progress_bar {
            pb.set_position(pos);
        }
    }

    pub fn finish(&self) {
        if let Some(pb) = &self.progress_bar {
            pb.finish();
        }
    }
}

/// Prints each dropout as it is found and keeps the progress bar moving.
pub struct ConsoleListener {
    output: Output,
    sample_rate: u32,
    digits: usize,
}

impl ConsoleListener {
    pub fn new(args: &Cli, num_samples: usize, sample_rate: u32) -> Self {
        Self {
            output: Output::new(args, num_samples as u64),
            sample_rate,
            digits: num_samples.to_string().len(),
        }
    }

    pub fn finish(&self) {
        self.output.finish();
    }
}

impl DetectionListener for ConsoleListener {
    fn on_dropout(&mut self, dropout: Dropout) {
        let dropout_start = sample_to_time(dropout.position, self.sample_rate);
        let dropout_end = sample_to_time(dropout.end(), self.sample_rate);
        let dropout_duration = dropout.duration as f64 / self.sample_rate as f64;
        output!(
            "[{}] DROPOUT      : {} samples ({:06.3}s) {} -> {}",
            fmt_pos(dropout.position, self.digits),
            dropout.duration,
            dropout_duration,
            dropout_start,
            dropout_end
        );
    }

    fn on_progress(&mut self, processed: usize, _total: usize) {
        self.output.set_position(processed as u64);
    }
}
