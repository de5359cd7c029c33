use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelErrorKind {
    Untrained,
    InvalidInput,
    NotFound,
    Internal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelError {
    pub kind: ModelErrorKind,
    pub message: String,
}

impl ModelError {
    pub fn new(kind: ModelErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ModelError {}

pub fn untrained(model: &str) -> ModelError {
    ModelError::new(
        ModelErrorKind::Untrained,
        format!("{model} must be trained before it can be queried"),
    )
}

pub fn invalid_input(message: impl Into<String>) -> ModelError {
    ModelError::new(ModelErrorKind::InvalidInput, message)
}

pub fn not_found(message: impl Into<String>) -> ModelError {
    ModelError::new(ModelErrorKind::NotFound, message)
}

pub fn internal_error(message: impl Into<String>) -> ModelError {
    ModelError::new(ModelErrorKind::Internal, message)
}
