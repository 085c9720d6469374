use std::num::ParseIntError;

/// Rejected simulation or link-field configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("palette `{0}` must contain at least one color")]
    EmptyPalette(&'static str),
    #[error("particle lifespan must be at least one frame")]
    ZeroLifespan,
    #[error("comet tail length must be at least one point")]
    ZeroTailLength,
    #[error("`{name}` must be a positive finite number, got {value}")]
    NonPositive { name: &'static str, value: f32 },
    #[error("surface dimensions must be finite and non-negative, got {width}x{height}")]
    InvalidSurface { width: f32, height: f32 },
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Malformed color literal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorParseError {
    #[error("expected `#rrggbb` or `#rrggbbaa`, got `{0}`")]
    Format(String),
    #[error("invalid hex digit: {0}")]
    Digit(#[from] ParseIntError),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
