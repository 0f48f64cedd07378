//! Tunables for the spark field, loadable from JSON.
//!
//! Every field has a default, so a config file only needs the keys it
//! changes: `{"target_population": 40}` is a complete document.

use serde::{Deserialize, Serialize};

use crate::core::{RendererError, RendererResult, Rng};

use super::palette::{Palette, DEFAULT_PALETTE};

/// Upper bound on `target_population`.
pub const MAX_POPULATION: usize = 4096;
/// Upper bound on `placement_attempts`; keeps a crowded spawn cheap.
pub const MAX_PLACEMENT_ATTEMPTS: u32 = 1000;

/// Closed interval a per-spark value is drawn from.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f32,
    pub max: f32,
}

impl Range {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn sample(&self, rng: &mut Rng) -> f32 {
        rng.range(self.min, self.max)
    }

    #[inline]
    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }

    fn validate(&self, name: &str) -> RendererResult<()> {
        if !(self.min.is_finite() && self.max.is_finite()) || self.min <= 0.0 || self.min > self.max {
            return Err(RendererError::InvalidConfig(format!(
                "{name} must satisfy 0 < min <= max, got [{}, {}]",
                self.min, self.max
            )));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SparkConfig {
    /// Side of a grid cell in logical units
    pub cell_size: u32,
    /// Live sparks kept on screen
    pub target_population: usize,
    /// Random picks before accepting an occupied cell
    pub placement_attempts: u32,
    pub fade_in: Range,
    pub hold: Range,
    pub fade_out: Range,
    pub scale: Range,
    /// Seconds a spark survives past full fade-out before removal
    pub linger: f32,
    /// Largest age step per frame, in seconds
    pub max_step: f32,
    /// Sparks at or below this opacity are not drawn
    pub alpha_threshold: f32,
    /// Viewports narrower than this use the mobile size multiplier
    pub mobile_breakpoint: f64,
    pub mobile_size_multiplier: f32,
    pub desktop_size_multiplier: f32,
    /// Extra size at full opacity (`1 + glow_growth * alpha`)
    pub glow_growth: f32,
    /// Glow sprite side, in cells, before scale
    pub sprite_extent: f32,
    pub housekeeping_interval_ms: u32,
    pub palette: Vec<String>,
}

impl Default for SparkConfig {
    fn default() -> Self {
        Self {
            cell_size: 16,
            target_population: 28,
            placement_attempts: 50,
            fade_in: Range::new(0.25, 0.45),
            hold: Range::new(0.25, 0.45),
            fade_out: Range::new(1.2, 1.8),
            scale: Range::new(1.0, 1.4),
            linger: 0.12,
            max_step: 0.05,
            alpha_threshold: 0.001,
            mobile_breakpoint: 768.0,
            mobile_size_multiplier: 2.05,
            desktop_size_multiplier: 1.8,
            glow_growth: 0.15,
            sprite_extent: 3.2,
            housekeeping_interval_ms: 5000,
            palette: DEFAULT_PALETTE.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl SparkConfig {
    pub fn from_json(json: &str) -> RendererResult<Self> {
        let config: SparkConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> RendererResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> RendererResult<()> {
        let invalid = |msg: String| Err(RendererError::InvalidConfig(msg));

        if self.cell_size == 0 {
            return invalid("cell_size must be positive".into());
        }
        if self.target_population > MAX_POPULATION {
            return invalid(format!(
                "target_population must be <= {MAX_POPULATION}, got {}",
                self.target_population
            ));
        }
        if self.placement_attempts == 0 || self.placement_attempts > MAX_PLACEMENT_ATTEMPTS {
            return invalid(format!(
                "placement_attempts must be in 1..={MAX_PLACEMENT_ATTEMPTS}, got {}",
                self.placement_attempts
            ));
        }
        self.fade_in.validate("fade_in")?;
        self.hold.validate("hold")?;
        self.fade_out.validate("fade_out")?;
        self.scale.validate("scale")?;
        if self.scale.max * 10.0 > u8::MAX as f32 {
            return invalid(format!("scale.max {} too large", self.scale.max));
        }
        if !(self.linger.is_finite() && self.linger >= 0.0) {
            return invalid(format!("linger must be >= 0, got {}", self.linger));
        }
        if !(self.max_step.is_finite() && self.max_step > 0.0) {
            return invalid(format!("max_step must be > 0, got {}", self.max_step));
        }
        if !(0.0..1.0).contains(&self.alpha_threshold) {
            return invalid(format!(
                "alpha_threshold must be in [0, 1), got {}",
                self.alpha_threshold
            ));
        }
        for (name, value) in [
            ("mobile_size_multiplier", self.mobile_size_multiplier),
            ("desktop_size_multiplier", self.desktop_size_multiplier),
            ("sprite_extent", self.sprite_extent),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return invalid(format!("{name} must be > 0, got {value}"));
            }
        }
        if !(self.glow_growth.is_finite() && self.glow_growth >= 0.0) {
            return invalid(format!("glow_growth must be >= 0, got {}", self.glow_growth));
        }
        if self.housekeeping_interval_ms == 0 {
            return invalid("housekeeping_interval_ms must be positive".into());
        }
        self.palette()?;
        Ok(())
    }

    pub fn palette(&self) -> RendererResult<Palette> {
        Palette::from_hex_list(&self.palette)
    }

    /// Narrow viewports get slightly larger sparks relative to the cell.
    #[inline]
    pub fn size_multiplier(&self, logical_width: f64) -> f32 {
        if logical_width < self.mobile_breakpoint {
            self.mobile_size_multiplier
        } else {
            self.desktop_size_multiplier
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(SparkConfig::default().validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = SparkConfig::from_json(r#"{"target_population": 40}"#).unwrap();
        assert_eq!(config.target_population, 40);
        assert_eq!(config.cell_size, 16);
        assert_eq!(config.fade_out, Range::new(1.2, 1.8));
        assert_eq!(config.palette.len(), 10);
    }

    #[test]
    fn rejects_inverted_range() {
        let err = SparkConfig::from_json(r#"{"hold": {"min": 0.5, "max": 0.2}}"#).unwrap_err();
        assert!(matches!(err, RendererError::InvalidConfig(_)));
    }

    #[test]
    fn rejects_malformed_json() {
        let err = SparkConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, RendererError::ConfigParse(_)));
    }

    #[test]
    fn rejects_unbounded_population() {
        let config = SparkConfig {
            target_population: usize::MAX,
            ..SparkConfig::default()
        };
        assert!(matches!(config.validate(), Err(RendererError::InvalidConfig(_))));

        let at_cap = SparkConfig {
            target_population: MAX_POPULATION,
            ..SparkConfig::default()
        };
        assert!(at_cap.validate().is_ok());
    }

    #[test]
    fn rejects_unbounded_placement_attempts() {
        for attempts in [0, MAX_PLACEMENT_ATTEMPTS + 1, u32::MAX] {
            let config = SparkConfig {
                placement_attempts: attempts,
                ..SparkConfig::default()
            };
            assert!(config.validate().is_err(), "attempts {attempts}");
        }
        let err = SparkConfig::from_json(r#"{"placement_attempts": 4294967295}"#).unwrap_err();
        assert!(matches!(err, RendererError::InvalidConfig(_)));
    }

    #[test]
    fn rejects_bad_palette() {
        let err = SparkConfig::from_json(r##"{"palette": ["#12345g"]}"##).unwrap_err();
        assert!(matches!(err, RendererError::InvalidConfig(_)));
    }

    #[test]
    fn size_multiplier_switches_at_breakpoint() {
        let config = SparkConfig::default();
        assert_eq!(config.size_multiplier(767.0), 2.05);
        assert_eq!(config.size_multiplier(768.0), 1.8);
    }

    #[test]
    fn json_round_trip_preserves_config() {
        let config = SparkConfig::default();
        let json = config.to_json().unwrap();
        assert_eq!(SparkConfig::from_json(&json).unwrap(), config);
    }
}
