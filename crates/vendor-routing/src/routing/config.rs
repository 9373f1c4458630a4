use serde::{Deserialize, Serialize};

pub const MAX_WEIGHT: u8 = 10;

/// Tunable weights for the allocation score plus the backlog circuit breaker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingConfig {
    pub weight_otp: u8,
    pub weight_backlog: u8,
    pub weight_static: u8,
    pub backlog_threshold: u32,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            weight_otp: 8,
            weight_backlog: 6,
            weight_static: 2,
            backlog_threshold: 100,
        }
    }
}

impl RoutingConfig {
    pub fn new(
        weight_otp: u8,
        weight_backlog: u8,
        weight_static: u8,
        backlog_threshold: u32,
    ) -> Result<Self, RoutingConfigError> {
        let config = Self {
            weight_otp,
            weight_backlog,
            weight_static,
            backlog_threshold,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), RoutingConfigError> {
        for (name, value) in [
            ("weight_otp", self.weight_otp),
            ("weight_backlog", self.weight_backlog),
            ("weight_static", self.weight_static),
        ] {
            if value > MAX_WEIGHT {
                return Err(RoutingConfigError::WeightOutOfRange { name, value });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RoutingConfigError {
    #[error("{name} must be between 0 and 10, got {value}")]
    WeightOutOfRange { name: &'static str, value: u8 },
}
