//! Silent-run scanning over one contiguous window of samples.
//!
//! A window decomposes into a leading silent run, interior runs, and a
//! trailing silent run. The interior iterator yields neither the leading
//! nor the trailing run; the detector stitches those across window
//! boundaries itself.

use super::predicate::SilencePredicate;

/// A maximal run of silent samples, relative to the scanned window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SilentRun {
    pub start: usize,
    pub len: usize,
}

/// Length of the silent run starting at index 0; the window length if
/// every sample is silent.
pub fn count_leading_silence(window: &[f32], predicate: &SilencePredicate) -> usize {
    window
        .iter()
        .take_while(|&&sample| predicate.is_silent(sample))
        .count()
}

/// Length of the silent run ending at the last index; the window length
/// if every sample is silent.
pub fn count_trailing_silence(window: &[f32], predicate: &SilencePredicate) -> usize {
    window
        .iter()
        .rev()
        .take_while(|&&sample| predicate.is_silent(sample))
        .count()
}

/// Iterates every maximal silent run strictly between the leading and the
/// trailing run, in ascending start order. No minimum-length filtering
/// happens here; that is the detector's call.
pub fn inner_silence_runs<'a>(
    window: &'a [f32],
    predicate: &'a SilencePredicate,
) -> InnerSilenceRuns<'a> {
    InnerSilenceRuns {
        window,
        predicate,
        index: count_leading_silence(window, predicate),
    }
}

/// Single-pass iterator produced by [`inner_silence_runs`]. A run is only
/// yielded once a non-silent sample closes it, so a silent run touching
/// the window's end is never reported as interior.
pub struct InnerSilenceRuns<'a> {
    window: &'a [f32],
    predicate: &'a SilencePredicate,
    index: usize,
}

impl Iterator for InnerSilenceRuns<'_> {
    type Item = SilentRun;

    fn next(&mut self) -> Option<SilentRun> {
        let mut run: Option<SilentRun> = None;
        while self.index < self.window.len() {
            let silent = self.predicate.is_silent(self.window[self.index]);
            self.index += 1;
            if silent {
                match &mut run {
                    Some(run) => run.len += 1,
                    None => {
                        run = Some(SilentRun {
                            start: self.index - 1,
                            len: 1,
                        })
                    }
                }
            } else if run.is_some() {
                return run;
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Buffer filled with `fill`, with the given `[start, end)` ranges
    /// zeroed out.
    fn signal(len: usize, fill: f32, silent_ranges: &[(usize, usize)]) -> Vec<f32> {
        let mut samples = vec![fill; len];
        for &(start, end) in silent_ranges {
            for sample in &mut samples[start..end] {
                *sample = 0.0;
            }
        }
        samples
    }

    fn predicate() -> SilencePredicate {
        SilencePredicate::from_db(-80.0)
    }

    #[test]
    fn leading_run_counted() {
        let samples = signal(4000, -0.5, &[(0, 200)]);
        assert_eq!(count_leading_silence(&samples, &predicate()), 200);
        assert_eq!(count_trailing_silence(&samples, &predicate()), 0);
    }

    #[test]
    fn trailing_run_counted() {
        let samples = signal(4000, -0.5, &[(3800, 4000)]);
        assert_eq!(count_leading_silence(&samples, &predicate()), 0);
        assert_eq!(count_trailing_silence(&samples, &predicate()), 200);
    }

    #[test]
    fn fully_silent_window_counts_everywhere() {
        let samples = vec![0.0; 512];
        assert_eq!(count_leading_silence(&samples, &predicate()), 512);
        assert_eq!(count_trailing_silence(&samples, &predicate()), 512);
        assert_eq!(inner_silence_runs(&samples, &predicate()).count(), 0);
    }

    #[test]
    fn empty_window() {
        assert_eq!(count_leading_silence(&[], &predicate()), 0);
        assert_eq!(count_trailing_silence(&[], &predicate()), 0);
        assert_eq!(inner_silence_runs(&[], &predicate()).count(), 0);
    }

    #[test]
    fn interior_runs_in_ascending_order() {
        let samples = signal(4000, 0.5, &[(100, 200), (594, 680)]);
        let runs: Vec<SilentRun> = inner_silence_runs(&samples, &predicate()).collect();
        assert_eq!(
            runs,
            vec![
                SilentRun {
                    start: 100,
                    len: 100
                },
                SilentRun {
                    start: 594,
                    len: 86
                },
            ]
        );
    }

    #[test]
    fn interior_scan_skips_leading_and_trailing_runs() {
        let samples = signal(1000, 0.7, &[(0, 50), (400, 450), (900, 1000)]);
        let runs: Vec<SilentRun> = inner_silence_runs(&samples, &predicate()).collect();
        assert_eq!(
            runs,
            vec![SilentRun {
                start: 400,
                len: 50
            }]
        );
        assert_eq!(count_leading_silence(&samples, &predicate()), 50);
        assert_eq!(count_trailing_silence(&samples, &predicate()), 100);
    }

    #[test]
    fn adjacent_single_sample_runs() {
        // silent, loud, silent, loud: one interior run after a leading one
        let samples = vec![0.0, 0.5, 0.0, 0.5];
        let runs: Vec<SilentRun> = inner_silence_runs(&samples, &predicate()).collect();
        assert_eq!(runs, vec![SilentRun { start: 2, len: 1 }]);
    }

    #[test]
    fn single_silent_sample_is_both_leading_and_trailing() {
        let samples = vec![0.0];
        assert_eq!(count_leading_silence(&samples, &predicate()), 1);
        assert_eq!(count_trailing_silence(&samples, &predicate()), 1);
        assert_eq!(inner_silence_runs(&samples, &predicate()).count(), 0);
    }
}
