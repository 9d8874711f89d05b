use chrono::Duration;

/// Tunables of the fare/booking core, read once at startup.
#[derive(Debug, Clone)]
pub struct CoreConfig {
    pub hold_ttl_seconds: u64,
    pub simulator_period_seconds: u64,
    pub reaper_period_seconds: u64,
    pub price_drift_tolerance: f64,
    pub payment_success_probability: f64,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            hold_ttl_seconds: 900,
            simulator_period_seconds: 300,
            reaper_period_seconds: 60,
            price_drift_tolerance: 0.01,
            payment_success_probability: 1.0,
        }
    }
}

impl CoreConfig {
    /// Build from environment variables, falling back to defaults for
    /// anything unset or unparsable.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            hold_ttl_seconds: env_or("HOLD_TTL_SECONDS", defaults.hold_ttl_seconds),
            simulator_period_seconds: env_or(
                "SIMULATOR_PERIOD_SECONDS",
                defaults.simulator_period_seconds,
            ),
            reaper_period_seconds: env_or("REAPER_PERIOD_SECONDS", defaults.reaper_period_seconds),
            price_drift_tolerance: env_or(
                "PRICE_DRIFT_TOLERANCE",
                defaults.price_drift_tolerance,
            ),
            payment_success_probability: env_or(
                "PAYMENT_SUCCESS_PROBABILITY",
                defaults.payment_success_probability,
            ),
        }
    }

    pub fn hold_ttl(&self) -> Duration {
        Duration::seconds(self.hold_ttl_seconds as i64)
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CoreConfig::default();
        assert_eq!(config.hold_ttl_seconds, 900);
        assert_eq!(config.simulator_period_seconds, 300);
        assert_eq!(config.reaper_period_seconds, 60);
        assert_eq!(config.price_drift_tolerance, 0.01);
        assert_eq!(config.payment_success_probability, 1.0);
    }

    #[test]
    fn test_hold_ttl() {
        let config = CoreConfig {
            hold_ttl_seconds: 120,
            ..Default::default()
        };
        assert_eq!(config.hold_ttl(), Duration::seconds(120));
    }
}
