use log::debug;

/// Classifies a single normalized sample as silent or not.
///
/// The threshold is given in dBFS and converted once into a symmetric
/// amplitude band around zero; -6 dBFS is half of full scale, -20 dBFS a
/// tenth. The band is inclusive on both ends.
#[derive(Debug, Clone, Copy)]
pub struct SilencePredicate {
    min_amp: f32,
    max_amp: f32,
}

impl SilencePredicate {
    /// Callers are expected to hand in a threshold of at most 0 dBFS; the
    /// predicate itself does not clamp.
    pub fn from_db(threshold_db: f32) -> Self {
        let max_amp = 10f32.powf(threshold_db / 20.0);
        debug!("threshold {threshold_db} dBFS -> amplitude band +-{max_amp}");
        Self {
            min_amp: -max_amp,
            max_amp,
        }
    }

    #[inline]
    pub fn is_silent(&self, sample: f32) -> bool {
        self.min_amp <= sample && sample <= self.max_amp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_threshold_band() {
        let pred = SilencePredicate::from_db(-80.0);
        assert!(pred.is_silent(0.0));
        assert!(pred.is_silent(1e-10));
        assert!(pred.is_silent(-1e-10));
        assert!(!pred.is_silent(0.5));
        assert!(!pred.is_silent(-0.5));
        assert!(!pred.is_silent(0.001));
    }

    #[test]
    fn band_edges_are_inclusive() {
        let pred = SilencePredicate::from_db(-80.0);
        let edge = 10f32.powf(-80.0 / 20.0);
        assert!(pred.is_silent(edge));
        assert!(pred.is_silent(-edge));
        assert!(!pred.is_silent(edge * 1.01));
    }

    #[test]
    fn zero_db_accepts_full_scale() {
        let pred = SilencePredicate::from_db(0.0);
        assert!(pred.is_silent(1.0));
        assert!(pred.is_silent(-1.0));
        assert!(pred.is_silent(0.3));
    }

    #[test]
    fn extreme_threshold_leaves_only_near_zero() {
        let pred = SilencePredicate::from_db(-200.0);
        assert!(pred.is_silent(0.0));
        assert!(!pred.is_silent(1e-9));
    }

    #[test]
    fn raising_threshold_never_loses_silent_samples() {
        let samples: Vec<f32> = (0..2000)
            .map(|i| (i as f32 / 2000.0 - 0.5) * ((i % 17) as f32 / 16.0))
            .collect();

        let mut previous = 0;
        for db in [-160.0, -80.0, -40.0, -20.0, -6.0, 0.0] {
            let pred = SilencePredicate::from_db(db);
            let count = samples.iter().filter(|&&s| pred.is_silent(s)).count();
            assert!(
                count >= previous,
                "{db} dBFS classified {count} silent samples, below {previous}"
            );
            previous = count;
        }
    }
}
