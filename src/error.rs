//! Error types for the Dama front end

use crate::core::Coord;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DamaError {
    #[error("Invalid coordinate: row {row}, col {col}")]
    InvalidCoordinate { row: i32, col: i32 },

    #[error("No piece at {0}")]
    EmptySquare(Coord),

    #[error("Illegal move: {0}")]
    IllegalMove(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for DamaError {
    fn from(err: serde_json::Error) -> Self {
        DamaError::SerializationError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DamaError>;
