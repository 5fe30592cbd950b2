//! PDF assembly - page files into chapters, chapter files into the book
//!
//! Both levels share one contract: append every input's pages in the order
//! given, write exactly one output file, never touch the inputs. The only
//! difference is what counts as a valid input.

mod io;
mod merge;

pub use io::{load_pdf, save_pdf};
pub use merge::merge_documents;

use crate::types::AssemblyError;
use lopdf::Document;
use std::path::Path;

/// Page count each input file must have
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputPages {
    /// Page files: exactly one page
    Single,
    /// Chapter files: one page or more
    AtLeastOne,
}

impl InputPages {
    fn check(self, path: &Path, found: usize) -> Result<(), AssemblyError> {
        let (ok, expected) = match self {
            InputPages::Single => (found == 1, "exactly 1"),
            InputPages::AtLeastOne => (found >= 1, "at least 1"),
        };
        if ok {
            Ok(())
        } else {
            Err(AssemblyError::PageCount {
                path: path.to_path_buf(),
                expected,
                found,
            })
        }
    }
}

/// Merge single-page files, in page order, into one chapter file.
///
/// Returns the number of pages written.
pub async fn assemble_chapter(
    page_files: &[impl AsRef<Path>],
    output: impl AsRef<Path>,
) -> Result<usize, AssemblyError> {
    assemble(page_files, output, InputPages::Single).await
}

/// Merge chapter files, in chapter order, into the book file.
///
/// Returns the number of pages written.
pub async fn assemble_book(
    chapter_files: &[impl AsRef<Path>],
    output: impl AsRef<Path>,
) -> Result<usize, AssemblyError> {
    assemble(chapter_files, output, InputPages::AtLeastOne).await
}

/// Merge `inputs` into `output`, validating each input against `expected`.
pub async fn assemble(
    inputs: &[impl AsRef<Path>],
    output: impl AsRef<Path>,
    expected: InputPages,
) -> Result<usize, AssemblyError> {
    if inputs.is_empty() {
        return Err(AssemblyError::NoInputs);
    }

    let mut documents: Vec<Document> = Vec::with_capacity(inputs.len());
    for path in inputs {
        let path = path.as_ref();
        let doc = load_pdf(path).await?;
        expected.check(path, doc.get_pages().len())?;
        documents.push(doc);
    }

    let merged = tokio::task::spawn_blocking(move || merge_documents(documents))
        .await?
        .map_err(AssemblyError::Merge)?;
    let page_count = merged.get_pages().len();

    save_pdf(merged, output.as_ref()).await?;
    log::debug!(
        "Assembled {} input(s), {} page(s) -> {}",
        inputs.len(),
        page_count,
        output.as_ref().display()
    );
    Ok(page_count)
}
