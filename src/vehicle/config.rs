//! Tuning constants for the landing loop, loadable from TOML.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

/// Upper bound on any configured period, s.
const MAX_PERIOD_S: f64 = 3_600.0;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid guidance config: {0}")]
    Invalid(String),
}

/// Fixed tuning constants, set at construction and never changed mid-descent.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GuidanceConfig {
    /// Fraction of effective thrust the speed profile may plan with.
    pub eng_threshold: f64,
    /// Desired touchdown vertical speed, m/s (<= 0).
    pub final_speed: f64,
    /// Height at which the final hover burn takes over, m.
    pub hover_altitude: f64,
    /// Deploy gear once the estimated time to impact drops below this, s.
    pub gears_delay: f64,
    /// The descent loop starts once below this altitude and falling, m.
    pub wait_altitude: f64,
    /// Final burn starts at `hover_altitude + final_burn_margin`.
    pub final_burn_margin: f64,
    pub descent_gain: f64,
    pub final_gain: f64,
    /// Multiplier on the vertical retrograde component during the final burn.
    pub final_retro_gain: f64,
    /// Forward bias of the target-tracking pointing vector (surface up axis).
    pub forward_bias: f64,
    /// Fraction of the prograde error corrected per cycle.
    pub error_blend: f64,
    pub target_roll: f64,
    pub cycle_period_s: f64,
    pub settle_period_s: f64,
    pub rcs_hold_s: f64,
    /// Abort the loop after this many cycles. `None` runs until touchdown.
    pub cycle_limit: Option<u64>,
}

impl Default for GuidanceConfig {
    fn default() -> Self {
        Self {
            eng_threshold: 1.0,
            final_speed: -2.0,
            hover_altitude: 30.0,
            gears_delay: 2.0,
            wait_altitude: 8_000.0,
            final_burn_margin: 2.0,
            descent_gain: 10.0,
            final_gain: 5.0,
            final_retro_gain: 10.0,
            forward_bias: 2.0,
            error_blend: 0.5,
            target_roll: -90.0,
            cycle_period_s: 0.01,
            settle_period_s: 0.1,
            rcs_hold_s: 4.0,
            cycle_limit: None,
        }
    }
}

impl GuidanceConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: GuidanceConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| Err(ConfigError::Invalid(msg.to_owned()));
        if !(self.final_speed <= 0.0) {
            return invalid("final_speed must be <= 0");
        }
        if !(self.hover_altitude > 0.0) {
            return invalid("hover_altitude must be > 0");
        }
        if !(self.gears_delay > 0.0) {
            return invalid("gears_delay must be > 0");
        }
        if !(self.eng_threshold > 0.0 && self.eng_threshold <= 1.0) {
            return invalid("eng_threshold must be in (0, 1]");
        }
        if !(self.cycle_period_s > 0.0 && self.cycle_period_s <= MAX_PERIOD_S) {
            return invalid("cycle_period_s must be in (0, 3600]");
        }
        for (name, secs) in [("settle_period_s", self.settle_period_s), ("rcs_hold_s", self.rcs_hold_s)] {
            if !(secs >= 0.0 && secs <= MAX_PERIOD_S) {
                return Err(ConfigError::Invalid(format!("{name} must be in [0, 3600]")));
            }
        }
        Ok(())
    }

    /// Altitude at or below which the final hover burn engages.
    pub fn final_burn_altitude(&self) -> f64 {
        self.hover_altitude + self.final_burn_margin
    }

    // The period accessors assume a validated config; out-of-range values
    // read as zero instead of panicking.
    pub fn cycle_period(&self) -> Duration {
        Duration::try_from_secs_f64(self.cycle_period_s).unwrap_or_default()
    }

    pub fn settle_period(&self) -> Duration {
        Duration::try_from_secs_f64(self.settle_period_s).unwrap_or_default()
    }

    pub fn rcs_hold(&self) -> Duration {
        Duration::try_from_secs_f64(self.rcs_hold_s).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        let c = GuidanceConfig::default();
        assert!(c.validate().is_ok());
        assert_eq!(c.final_burn_altitude(), 32.0);
        assert_eq!(c.cycle_period(), Duration::from_millis(10));
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let c = GuidanceConfig::from_toml_str("hover_altitude = 50.0\nfinal_speed = -1.5\n").unwrap();
        assert_eq!(c.hover_altitude, 50.0);
        assert_eq!(c.final_speed, -1.5);
        assert_eq!(c.gears_delay, 2.0);
        assert!(c.cycle_limit.is_none());
    }

    #[test]
    fn rejects_upward_touchdown_speed() {
        let err = GuidanceConfig::from_toml_str("final_speed = 1.0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_nan_hover_altitude() {
        let c = GuidanceConfig { hover_altitude: f64::NAN, ..Default::default() };
        assert!(c.validate().is_err());
    }

    #[test]
    fn rejects_non_finite_and_oversized_periods() {
        for text in [
            "settle_period_s = nan",
            "rcs_hold_s = inf",
            "rcs_hold_s = -1.0",
            "cycle_period_s = nan",
            "cycle_period_s = 1e300",
            "settle_period_s = 1e300",
            "cycle_period_s = 0.0",
        ] {
            let err = GuidanceConfig::from_toml_str(text).unwrap_err();
            assert!(matches!(err, ConfigError::Invalid(_)), "{text} accepted");
        }
    }

    #[test]
    fn unvalidated_periods_do_not_panic() {
        let c = GuidanceConfig { settle_period_s: f64::NAN, cycle_period_s: 1e300, ..Default::default() };
        assert_eq!(c.settle_period(), Duration::ZERO);
        assert_eq!(c.cycle_period(), Duration::ZERO);
        assert_eq!(c.rcs_hold(), Duration::from_secs(4));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "gears_delay = 3.0\ncycle_limit = 5000").unwrap();
        let c = GuidanceConfig::load(file.path()).unwrap();
        assert_eq!(c.gears_delay, 3.0);
        assert_eq!(c.cycle_limit, Some(5000));
    }

    #[test]
    fn bad_toml_is_parse_error() {
        let err = GuidanceConfig::from_toml_str("gears_delay = \"soon\"").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }
}
