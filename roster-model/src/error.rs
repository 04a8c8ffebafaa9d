use std::fmt::{self, Display};

/// Errors produced when parsing model values from user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    UnknownSortField(String),
    UnknownSortDirection(String),
}

impl Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::UnknownSortField(raw) => {
                write!(f, "unknown sort field '{raw}' (expected mass or height)")
            }
            ModelError::UnknownSortDirection(raw) => {
                write!(f, "unknown sort direction '{raw}' (expected asc or desc)")
            }
        }
    }
}

impl std::error::Error for ModelError {}

pub type Result<T> = std::result::Result<T, ModelError>;
