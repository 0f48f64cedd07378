//! A single glowing cell and its fade-in → hold → fade-out lifecycle.

use crate::core::easing::smoothstep;
use crate::core::Rng;

use super::config::SparkConfig;
use super::viewport::Cell;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spark {
    pub cell: Cell,
    /// Palette index, fixed for the spark's lifetime
    pub color: u8,
    /// Seconds since spawn
    pub age: f32,
    pub fade_in: f32,
    pub hold: f32,
    pub fade_out: f32,
    pub total_duration: f32,
    pub scale: f32,
}

impl Spark {
    pub fn new(cell: Cell, color: u8, fade_in: f32, hold: f32, fade_out: f32, scale: f32) -> Self {
        Self {
            cell,
            color,
            age: 0.0,
            fade_in,
            hold,
            fade_out,
            total_duration: fade_in + hold + fade_out,
            scale,
        }
    }

    /// Fresh spark with durations and scale drawn from the config ranges.
    pub fn random(cell: Cell, color: u8, config: &SparkConfig, rng: &mut Rng) -> Self {
        let fade_in = config.fade_in.sample(rng);
        let hold = config.hold.sample(rng);
        let fade_out = config.fade_out.sample(rng);
        let scale = config.scale.sample(rng);
        Self::new(cell, color, fade_in, hold, fade_out, scale)
    }

    /// Positive finite fades, non-negative hold and age, positive scale.
    /// Anything else makes `alpha_at` divide by zero or go NaN.
    pub fn has_valid_timings(&self) -> bool {
        let positive = |v: f32| v.is_finite() && v > 0.0;
        let non_negative = |v: f32| v.is_finite() && v >= 0.0;
        positive(self.fade_in)
            && non_negative(self.hold)
            && positive(self.fade_out)
            && positive(self.total_duration)
            && positive(self.scale)
            && non_negative(self.age)
    }

    #[inline]
    pub fn alpha(&self) -> f32 {
        self.alpha_at(self.age)
    }

    /// Opacity at age `a`.
    ///
    /// Fade-out progress is taken from the remaining time so that
    /// `alpha_at(total_duration)` is exactly zero.
    pub fn alpha_at(&self, a: f32) -> f32 {
        if a <= self.fade_in {
            smoothstep(a / self.fade_in)
        } else if a <= self.fade_in + self.hold {
            1.0
        } else if a <= self.total_duration {
            let t = 1.0 - (self.total_duration - a) / self.fade_out;
            1.0 - smoothstep(t.clamp(0.0, 1.0))
        } else {
            0.0
        }
    }

    /// Ages never go backwards.
    #[inline]
    pub fn advance(&mut self, dt: f32) {
        if dt > 0.0 {
            self.age += dt;
        }
    }

    #[inline]
    pub fn is_expired(&self, linger: f32) -> bool {
        self.age > self.total_duration + linger
    }

    /// Scale rounded to one decimal, in tenths (1.26 -> 13).
    #[inline]
    pub fn scale_bucket(&self) -> u8 {
        (self.scale * 10.0).round() as u8
    }

    /// Cell centre in logical units.
    #[inline]
    pub fn center(&self, cell_size: f32) -> (f32, f32) {
        (
            self.cell.x as f32 * cell_size + cell_size / 2.0,
            self.cell.y as f32 * cell_size + cell_size / 2.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_spark() -> Spark {
        Spark::new(Cell::new(3, 4), 0, 0.3, 0.3, 1.5, 1.2)
    }

    #[test]
    fn boundary_alphas_are_exact() {
        let s = reference_spark();
        assert_eq!(s.alpha_at(0.0), 0.0);
        assert_eq!(s.alpha_at(s.fade_in), 1.0);
        assert_eq!(s.alpha_at(s.total_duration), 0.0);
    }

    #[test]
    fn holds_full_opacity() {
        let s = reference_spark();
        for a in [0.31, 0.4, 0.5, 0.59] {
            assert_eq!(s.alpha_at(a), 1.0, "age {a}");
        }
        assert!((s.alpha_at(0.6) - 1.0).abs() < 1e-4);
    }

    #[test]
    fn fades_monotonically() {
        let s = reference_spark();
        let mut prev = s.alpha_at(0.6);
        let mut a = 0.65;
        while a < 2.1 {
            let alpha = s.alpha_at(a);
            assert!(alpha <= prev + 1e-6);
            prev = alpha;
            a += 0.05;
        }
        assert_eq!(s.alpha_at(2.15), 0.0);
    }

    #[test]
    fn expiry_includes_linger() {
        let mut s = reference_spark();
        s.age = 2.2;
        assert!(!s.is_expired(0.12));
        s.age = 2.23;
        assert!(s.is_expired(0.12));
    }

    #[test]
    fn degenerate_timings_are_invalid() {
        assert!(reference_spark().has_valid_timings());
        let zero_fade_in = Spark::new(Cell::new(0, 0), 0, 0.0, 0.3, 1.5, 1.0);
        assert!(zero_fade_in.alpha_at(0.0).is_nan());
        assert!(!zero_fade_in.has_valid_timings());
        assert!(!Spark::new(Cell::new(0, 0), 0, 0.3, 0.3, 0.0, 1.0).has_valid_timings());
        assert!(!Spark::new(Cell::new(0, 0), 0, 0.3, f32::NAN, 1.5, 1.0).has_valid_timings());
        assert!(!Spark::new(Cell::new(0, 0), 0, f32::INFINITY, 0.3, 1.5, 1.0).has_valid_timings());
        assert!(!Spark::new(Cell::new(0, 0), 0, 0.3, 0.3, 1.5, -1.0).has_valid_timings());
    }

    #[test]
    fn advance_ignores_negative_steps() {
        let mut s = reference_spark();
        s.advance(0.05);
        s.advance(-1.0);
        assert_eq!(s.age, 0.05);
    }

    #[test]
    fn random_spark_respects_ranges() {
        let config = SparkConfig::default();
        let mut rng = Rng::new(4242);
        for _ in 0..500 {
            let s = Spark::random(Cell::new(0, 0), 1, &config, &mut rng);
            assert!(config.fade_in.contains(s.fade_in));
            assert!(config.hold.contains(s.hold));
            assert!(config.fade_out.contains(s.fade_out));
            assert!(config.scale.contains(s.scale));
            assert!((10..=14).contains(&s.scale_bucket()));
        }
    }

    #[test]
    fn center_is_middle_of_cell() {
        let s = reference_spark();
        assert_eq!(s.center(16.0), (56.0, 72.0));
    }
}
