//! Error types for md2rtf-core

use thiserror::Error;

/// Errors from the fallible entry points (RTF conversion itself never fails)
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid document tree: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
