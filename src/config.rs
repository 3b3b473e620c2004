//! Page configuration.
//!
//! Every value has a default matching the shipped landing page, so an empty
//! document is a valid configuration:
//!
//! ```toml
//! [header]
//! hero_margin_top = -30.0
//!
//! [carousel]
//! step = 200.0
//! interval_ms = 2000
//!
//! [counter]
//! target = 27
//! duration_ms = 2000
//!
//! [menu]
//! entry_delay_ms = 200
//! entry_stagger_ms = 100
//! exit_stagger_ms = 50
//! overlay_fade_ms = 300
//! ```

use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::types::{IntersectionOptions, RootMargin};

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LandingConfig {
    pub header: HeaderConfig,
    pub carousel: CarouselConfig,
    pub counter: CounterConfig,
    pub menu: MenuConfig,
}

impl LandingConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: LandingConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.header.hero_margin_top.is_finite() {
            return Err(ConfigError::invalid("header.hero_margin_top", "must be finite"));
        }
        if !self.carousel.step.is_finite() || self.carousel.step <= 0.0 {
            return Err(ConfigError::invalid("carousel.step", "must be a positive number"));
        }
        if self.carousel.interval_ms == 0 {
            return Err(ConfigError::invalid("carousel.interval_ms", "must be greater than zero"));
        }
        Ok(())
    }
}

/// Header appearance tracking.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HeaderConfig {
    /// Offset applied to the viewport's top edge when observing the hero.
    pub hero_margin_top: f64,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self { hero_margin_top: -30.0 }
    }
}

impl HeaderConfig {
    pub fn hero_options(&self) -> IntersectionOptions {
        IntersectionOptions::with_margin(RootMargin::top(self.hero_margin_top))
    }
}

/// Brand carousel motion.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CarouselConfig {
    /// Pixels advanced per tick.
    pub step: f64,
    /// Milliseconds between ticks. Zero leaves the carousel stopped.
    pub interval_ms: u64,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self { step: 200.0, interval_ms: 2000 }
    }
}

impl CarouselConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

/// Animated statistic.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CounterConfig {
    pub target: u32,
    /// Zero completes the animation on its first frame.
    pub duration_ms: u64,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self { target: 27, duration_ms: 2000 }
    }
}

impl CounterConfig {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

/// Mobile menu overlay timing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MenuConfig {
    /// Delay before the first item starts entering.
    pub entry_delay_ms: u64,
    /// Extra delay for each subsequent item on entry.
    pub entry_stagger_ms: u64,
    /// Extra delay for each preceding item on exit.
    pub exit_stagger_ms: u64,
    pub overlay_fade_ms: u64,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            entry_delay_ms: 200,
            entry_stagger_ms: 100,
            exit_stagger_ms: 50,
            overlay_fade_ms: 300,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_is_default() {
        let config = LandingConfig::from_toml_str("").unwrap();
        assert_eq!(config, LandingConfig::default());
        assert_eq!(config.carousel.interval(), Duration::from_secs(2));
        assert_eq!(config.counter.target, 27);
        assert_eq!(config.header.hero_options().margin.top, -30.0);
    }

    #[test]
    fn test_partial_override() {
        let config = LandingConfig::from_toml_str(
            r#"
            [counter]
            target = 500

            [carousel]
            step = 160.0
            "#,
        )
        .unwrap();

        assert_eq!(config.counter.target, 500);
        assert_eq!(config.counter.duration_ms, 2000);
        assert_eq!(config.carousel.step, 160.0);
        assert_eq!(config.carousel.interval_ms, 2000);
    }

    #[test]
    fn test_rejects_zero_step() {
        let err = LandingConfig::from_toml_str("[carousel]\nstep = 0.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "carousel.step", .. }));
    }

    #[test]
    fn test_rejects_zero_interval() {
        let err = LandingConfig::from_toml_str("[carousel]\ninterval_ms = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "carousel.interval_ms", .. }));
    }

    #[test]
    fn test_rejects_unknown_fields() {
        let err = LandingConfig::from_toml_str("[menu]\nspeed = 3\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
