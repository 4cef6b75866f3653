use thiserror::Error;

#[derive(Debug, Error)]
pub enum IntegrationError {
    #[error("required fields are empty: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("invalid verification url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("provider unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{0}")]
    Rejected(String),
}
