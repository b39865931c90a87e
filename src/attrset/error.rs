use thiserror::Error;

#[derive(Error, Debug)]
pub enum AttrError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid assignment '{0}': expected NAME=VALUE")]
    InvalidAssignment(String),

    #[error("Expected a JSON object of attribute names, found {0}")]
    NotAnObject(&'static str),
}

pub type Result<T> = std::result::Result<T, AttrError>;
