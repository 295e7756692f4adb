use thiserror::Error;

/// Errors raised while loading or validating a [`SessionConfig`](crate::SessionConfig)
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("tick_throttle must be at least 1")]
    ZeroThrottle,
    #[error("initial_speed and min_speed must be at least 1")]
    ZeroSpeed,
    #[error("speed_step must be at least 1")]
    ZeroSpeedStep,
    #[error("min_speed ({min}) is above initial_speed ({initial})")]
    MinSpeedAboveInitial { min: u32, initial: u32 },
    #[error("score_digits must be between 1 and 10, got {0}")]
    ScoreDigits(usize),
}
