use book_reflow::{BookError, RenderError, SourceError};
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("Browser error: {0}")]
    Browser(#[from] chromiumoxide::error::CdpError),
    #[error("Browser launch failed: {0}")]
    Launch(String),
    #[error("Timed out after {timeout:?} waiting for `{selector}`")]
    Timeout { selector: String, timeout: Duration },
    #[error("Element `{0}` not found")]
    NotFound(String),
    #[error("Script result could not be decoded: {0}")]
    Json(#[from] serde_json::Error),
    #[error(
        "You have tried to read this from too many computers or web browsers recently, and will need to wait up to 24 hours before returning to this book."
    )]
    BrowserLimit,
    #[error("Unsupported book URL: {0}")]
    Unsupported(String),
    #[error("Invalid session cookie: {0}")]
    Cookie(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Book(#[from] BookError),
}

pub type Result<T> = std::result::Result<T, CaptureError>;

impl From<CaptureError> for SourceError {
    fn from(e: CaptureError) -> Self {
        SourceError(e.to_string())
    }
}

impl From<CaptureError> for RenderError {
    fn from(e: CaptureError) -> Self {
        RenderError(e.to_string())
    }
}
