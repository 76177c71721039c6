use thiserror::Error;

#[derive(Debug, Error)]
pub enum RivalryError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Repository error: {0}")]
    Repository(String),
}
