use rand::Rng;
use rand::distributions::uniform::SampleUniform;

/// Linear interpolation between `a` and `b` at parameter `t`.
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Closed parameter range `[min, max]`, sampled once per randomized decision.
///
/// A degenerate interval (`min == max`) always yields its single value and
/// consumes no randomness; the glyph transforms use [`Interval::is_fixed`]
/// for their identity fast paths.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Interval<T> {
    /// Inclusive lower bound.
    pub min: T,
    /// Inclusive upper bound.
    pub max: T,
}

impl<T: Copy + PartialOrd + SampleUniform> Interval<T> {
    /// Build an interval from inclusive bounds.
    pub fn new(min: T, max: T) -> Self {
        Self { min, max }
    }

    /// Build a degenerate interval that always samples to `value`.
    pub fn fixed(value: T) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    /// Whether the interval holds a single value.
    pub fn is_fixed(&self) -> bool {
        self.min == self.max
    }

    /// Draw a value uniformly from the interval.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> T {
        if self.is_fixed() {
            self.min
        } else {
            rng.gen_range(self.min..=self.max)
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn lerp_hits_endpoints_and_midpoint() {
        assert_eq!(lerp(2.0, 10.0, 0.0), 2.0);
        assert_eq!(lerp(2.0, 10.0, 1.0), 10.0);
        assert_eq!(lerp(2.0, 10.0, 0.5), 6.0);
    }

    #[test]
    fn fixed_interval_samples_without_randomness() {
        let mut rng = StdRng::seed_from_u64(7);
        let interval = Interval::fixed(3.5f64);
        assert!(interval.is_fixed());
        for _ in 0..8 {
            assert_eq!(interval.sample(&mut rng), 3.5);
        }
    }

    #[test]
    fn sample_stays_within_bounds() {
        let mut rng = StdRng::seed_from_u64(42);
        let interval = Interval::new(-4.0f64, 9.0);
        for _ in 0..256 {
            let v = interval.sample(&mut rng);
            assert!((-4.0..=9.0).contains(&v));
        }

        let counts = Interval::new(1u32, 6);
        for _ in 0..256 {
            let v = counts.sample(&mut rng);
            assert!((1..=6).contains(&v));
        }
    }
}
