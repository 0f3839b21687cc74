use thiserror::Error;

#[derive(Error, Debug)]
pub enum TruthScopeError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not configured: {0}")]
    NotConfigured(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Validation error: {0}")]
    Validation(String),
}
