use bevy::prelude::Resource;
use std::str::FromStr;
use std::time::Duration;

/// Default pause between winning a level and loading the next one
pub const DEFAULT_ADVANCE_DELAY_SECS: f32 = 3.5;
/// Default frame rate of the headless loop
pub const DEFAULT_TICK_RATE_HZ: f64 = 60.0;
/// Accepted frame rates of the headless loop
pub const MIN_TICK_RATE_HZ: f64 = 1.0;
pub const MAX_TICK_RATE_HZ: f64 = 1000.0;

pub const ENV_ADVANCE_DELAY: &str = "ARTISAN_ADVANCE_DELAY";
pub const ENV_TICK_RATE: &str = "ARTISAN_TICK_RATE";
pub const ENV_START_LEVEL: &str = "ARTISAN_START_LEVEL";

/// Tunables for the level session
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct SessionConfig {
    /// Seconds between a win and the next level
    pub advance_delay_secs: f32,
    /// Frames per second of the schedule runner
    pub tick_rate_hz: f64,
    /// Level the session starts on
    pub start_level: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            advance_delay_secs: DEFAULT_ADVANCE_DELAY_SECS,
            tick_rate_hz: DEFAULT_TICK_RATE_HZ,
            start_level: 1,
        }
    }
}

impl SessionConfig {
    /// Duration of one frame of the schedule runner
    pub fn frame_duration(&self) -> Duration {
        let rate = if (MIN_TICK_RATE_HZ..=MAX_TICK_RATE_HZ).contains(&self.tick_rate_hz) {
            self.tick_rate_hz
        } else {
            DEFAULT_TICK_RATE_HZ
        };
        Duration::from_secs_f64(1.0 / rate)
    }

    /// Read overrides from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup; unset keys keep their default,
    /// unparsable or out-of-range values are logged and ignored
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(delay) = parse_var::<f32>(&lookup, ENV_ADVANCE_DELAY) {
            if delay.is_finite() && delay >= 0.0 {
                config.advance_delay_secs = delay;
            } else {
                log::warn!("{ENV_ADVANCE_DELAY} must be a non-negative number, got {delay}");
            }
        }

        if let Some(rate) = parse_var::<f64>(&lookup, ENV_TICK_RATE) {
            if (MIN_TICK_RATE_HZ..=MAX_TICK_RATE_HZ).contains(&rate) {
                config.tick_rate_hz = rate;
            } else {
                log::warn!(
                    "{ENV_TICK_RATE} must be between {MIN_TICK_RATE_HZ} and {MAX_TICK_RATE_HZ}, got {rate}"
                );
            }
        }

        if let Some(level) = parse_var::<usize>(&lookup, ENV_START_LEVEL) {
            if level >= 1 {
                config.start_level = level;
            } else {
                log::warn!("{ENV_START_LEVEL} must be at least 1");
            }
        }

        config
    }
}

fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            log::warn!("Ignoring {key}={raw:?}: not a valid value");
            None
        }
    }
}
