use thiserror::Error;

/// A request parameter that failed validation. `field` uses the JSON name.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("invalid `{field}`: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum TrendError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("failed to load sales history: {0:#}")]
    Storage(anyhow::Error),

    #[error("failed to persist predictions: {0:#}")]
    Persist(anyhow::Error),
}

impl TrendError {
    pub fn is_validation(&self) -> bool {
        matches!(self, TrendError::Validation(_))
    }
}
