use thiserror::Error;

use crate::bits::{U5, U6};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ApplyError {
    #[error("tile at row {row}, column {column} lies outside the screen")]
    OutOfRange { row: U5, column: U6 },
}

/// Failures of the player binary.
#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("pixels error: {0}")]
    Pixels(#[from] pixels::Error),
    #[error("window error: {0}")]
    Window(#[from] winit::error::OsError),
    #[error("{0}")]
    Usage(String),
}
