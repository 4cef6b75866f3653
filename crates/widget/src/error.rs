use thiserror::Error;

/// Failures talking to the widget settings endpoint.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings endpoint unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("settings endpoint responded with {status}")]
    Status {
        status: u16,
        message: Option<String>,
    },

    #[error("unexpected settings payload: {0}")]
    Malformed(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        min: u32,
        max: u32,
        value: u32,
    },
}

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("invalid widget settings: {}", .0.iter().map(ToString::to_string).collect::<Vec<_>>().join("; "))]
    Invalid(Vec<ConfigError>),

    #[error(transparent)]
    Backend(#[from] SettingsError),
}

impl SaveError {
    pub const GENERIC_MESSAGE: &'static str = "Не удалось сохранить настройки";

    /// Text shown to the operator: the server's own `error` message when it
    /// sent one, a generic notice otherwise.
    pub fn user_message(&self) -> String {
        match self {
            SaveError::Invalid(_) => self.to_string(),
            SaveError::Backend(SettingsError::Status { message: Some(message), .. }) => message.clone(),
            SaveError::Backend(_) => Self::GENERIC_MESSAGE.to_string(),
        }
    }
}
