//! Seams to the browser-side collaborators
//!
//! The pipeline never talks to a browser directly. A [`PageSource`] walks the
//! reader UI and hands over page fragments chapter by chapter; a
//! [`PageRenderer`] prints one transformed document to PDF bytes.

use crate::types::BookError;
use std::future::Future;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
#[error("{0}")]
pub struct RenderError(pub String);

#[derive(Error, Debug, Clone, PartialEq)]
#[error("{0}")]
pub struct SourceError(pub String);

impl From<SourceError> for BookError {
    fn from(e: SourceError) -> Self {
        BookError::Source(e.0)
    }
}

/// One independent print surface. Pools hold several of these.
pub trait PageRenderer: Send + 'static {
    /// Load `document` and print it, honouring its CSS page size.
    fn render(&mut self, document: &str) -> impl Future<Output = Result<Vec<u8>, RenderError>> + Send;
}

/// Stateful, strictly sequential access to a book's chapters.
pub trait PageSource {
    /// `@font-face` declarations shared by every page of the book
    fn font_faces(&mut self) -> impl Future<Output = Result<String, SourceError>> + Send;

    fn chapter_count(&self) -> usize;

    /// Fragments of the current chapter in page order, then advance to the
    /// next chapter. `None` once every chapter has been returned.
    fn next_chapter(
        &mut self,
    ) -> impl Future<Output = Result<Option<Vec<String>>, SourceError>> + Send;
}
