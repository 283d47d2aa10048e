use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {field} {reason}")]
    Invalid { field: &'static str, reason: String },

    #[error("could not parse {var}={value:?}")]
    Parse { var: String, value: String },

    #[error("unknown profile {0:?} (expected standard, classic, crossover or short)")]
    UnknownProfile(String),

    #[error("unknown time zone {0:?}")]
    UnknownTimezone(String),
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field,
            reason: reason.into(),
        }
    }
}
