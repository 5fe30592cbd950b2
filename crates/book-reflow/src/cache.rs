//! On-disk layout of intermediate page and chapter files
//!
//! Page files are `<cache_dir>/<chapter_no>_<page_no>.pdf`, chapter files
//! `<cache_dir>/<chapter_no>.pdf`, and the book `<book_filename>.pdf` in the
//! output directory.

use crate::constants::PDF_EXTENSION;
use crate::types::{PageKey, Result};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheLayout {
    cache_dir: PathBuf,
}

impl CacheLayout {
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
        }
    }

    /// Cache directory named after the book, inside `work_dir`
    pub fn for_book(work_dir: impl AsRef<Path>, book_filename: &str) -> Self {
        Self::new(work_dir.as_ref().join(book_filename))
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    pub fn page_pdf(&self, key: PageKey) -> PathBuf {
        self.cache_dir
            .join(format!("{}_{}.{}", key.chapter, key.page, PDF_EXTENSION))
    }

    pub fn chapter_pdf(&self, chapter: u32) -> PathBuf {
        self.cache_dir
            .join(format!("{}.{}", chapter, PDF_EXTENSION))
    }

    pub async fn create(&self) -> Result<()> {
        tokio::fs::create_dir_all(&self.cache_dir).await?;
        Ok(())
    }

    /// Remove the cache directory and everything in it. A missing directory is not an error.
    pub async fn purge(&self) -> Result<()> {
        match tokio::fs::remove_dir_all(&self.cache_dir).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Final book file, `<output_dir>/<book_filename>.pdf`
pub fn book_pdf(output_dir: impl AsRef<Path>, book_filename: &str) -> PathBuf {
    output_dir
        .as_ref()
        .join(format!("{}.{}", book_filename, PDF_EXTENSION))
}
