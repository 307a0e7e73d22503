mod cli;
mod detect;
mod json;
mod output;
mod wav;

use anyhow::Context;
use clap::Parser;
use std::process::ExitCode;

use cli::Cli;
use detect::DropoutDetector;
use json::ScanReport;
use output::{ConsoleListener, sample_to_time};

const ERR_CONTAINS_DROPOUTS: u8 = 0b0001;
const ERR_RUN_FAILED: u8 = 2;

fn scan(args: &Cli) -> anyhow::Result<u8> {
    let mut return_code = 0;

    let track = wav::load_mono(&args.input)
        .with_context(|| format!("could not open {}", args.input.display()))?;

    let threshold = args.effective_threshold();
    let detector = DropoutDetector::new(track.sample_rate, threshold, args.min_duration)?;

    println!("[+] sample rate:   {}", track.sample_rate);
    println!("[+] total samples: {}", track.samples.len());
    println!(
        "[+] length:        {}",
        sample_to_time(track.samples.len(), track.sample_rate)
    );
    println!("[+] threshold:     {} dBFS", threshold);
    println!(
        "[+] min duration:  {} ms ({} samples)",
        args.min_duration,
        detector.min_duration_samples()
    );

    let mut listener = ConsoleListener::new(args, track.samples.len(), track.sample_rate);
    let dropouts = detector.detect(&track.samples, &mut listener);
    listener.finish();

    println!("[+] dropouts:      {}", dropouts.len());
    if !dropouts.is_empty() {
        return_code |= ERR_CONTAINS_DROPOUTS;
    }

    if let Some(path) = args.json.as_deref() {
        ScanReport {
            input: &args.input,
            sample_rate: track.sample_rate,
            total_samples: track.samples.len(),
            threshold_db: threshold,
            min_duration_ms: args.min_duration,
            min_duration_samples: detector.min_duration_samples(),
            dropouts: &dropouts,
        }
        .write(path)?;
    }

    if args.fix || args.output.is_some() {
        let out_path = args
            .output
            .clone()
            .unwrap_or_else(|| wav::fixed_path(&args.input));
        wav::ensure_overwritable(&out_path, args.force)?;

        let repaired = wav::remove_dropouts(&track.samples, &dropouts);
        wav::write_mono(&out_path, &repaired, track.sample_rate)
            .with_context(|| format!("could not write {}", out_path.display()))?;
        println!(
            "[+] removed {} samples, wrote {}",
            track.samples.len() - repaired.len(),
            out_path.display()
        );
    }

    Ok(return_code)
}

fn main() -> ExitCode {
    let args = Cli::parse();

    let default_level = match args.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp_millis()
        .init();

    match scan(&args) {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(ERR_RUN_FAILED)
        }
    }
}
