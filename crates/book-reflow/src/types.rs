use crate::constants::DEFAULT_ZOOM;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BookError {
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
    #[error(transparent)]
    Assembly(#[from] AssemblyError),
    #[error("Render failed for page {key}: {message}")]
    Render { key: PageKey, message: String },
    #[error("Page source error: {0}")]
    Source(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, BookError>;

/// A page fragment carried no usable `width: Wpx; height: Hpx;` declaration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtractionError {
    #[error("no `width: <n>px; height: <n>px;` declaration in page fragment")]
    Missing,
    #[error("malformed page geometry value `{value}`")]
    Malformed { value: String },
}

/// A page or chapter file could not be merged.
#[derive(Error, Debug)]
pub enum AssemblyError {
    #[error("No input files to assemble")]
    NoInputs,
    #[error("Input file {} does not exist", path.display())]
    Missing { path: PathBuf },
    #[error("Cannot read {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{} is not a valid PDF: {source}", path.display())]
    Invalid {
        path: PathBuf,
        #[source]
        source: lopdf::Error,
    },
    #[error("{} has {found} pages, expected {expected}", path.display())]
    PageCount {
        path: PathBuf,
        expected: &'static str,
        found: usize,
    },
    #[error("{} has {found} pages, but its inputs add up to {expected}", path.display())]
    PageTotal {
        path: PathBuf,
        expected: usize,
        found: usize,
    },
    #[error("Failed to merge documents: {0}")]
    Merge(#[source] lopdf::Error),
    #[error("Cannot write {}: {message}", path.display())]
    Write { path: PathBuf, message: String },
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

/// Declared pixel size of one page fragment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width: f64,
    pub height: f64,
}

impl PageGeometry {
    /// Printed size once the zoom factor is applied
    pub fn scaled(self, zoom: Zoom) -> (f64, f64) {
        (self.width * zoom.get(), self.height * zoom.get())
    }
}

/// Ratio between the reader's on-screen scale and the print scale.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "f64", into = "f64"))]
pub struct Zoom(f64);

impl Zoom {
    pub fn new(value: f64) -> Result<Self> {
        if value.is_finite() && value > 0.0 {
            Ok(Self(value))
        } else {
            Err(BookError::Config(format!(
                "Zoom must be a positive number, got {}",
                value
            )))
        }
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

impl Default for Zoom {
    fn default() -> Self {
        Self(DEFAULT_ZOOM)
    }
}

impl TryFrom<f64> for Zoom {
    type Error = BookError;

    fn try_from(value: f64) -> Result<Self> {
        Zoom::new(value)
    }
}

impl From<Zoom> for f64 {
    fn from(zoom: Zoom) -> Self {
        zoom.0
    }
}

/// Position of a page within the book. Both indices are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PageKey {
    pub chapter: u32,
    pub page: u32,
}

impl PageKey {
    pub fn new(chapter: u32, page: u32) -> Self {
        Self { chapter, page }
    }
}

impl fmt::Display for PageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.chapter, self.page)
    }
}

/// Per-book inputs of the reflow transformer
#[derive(Debug, Clone, PartialEq)]
pub struct ReflowContext {
    /// Origin used to absolutise root-relative `src` references, without a trailing slash
    pub origin: String,
    pub zoom: Zoom,
    /// `@font-face` declarations injected into every page's style block
    pub font_faces: String,
}

impl ReflowContext {
    pub fn new(origin: impl Into<String>, zoom: Zoom, font_faces: impl Into<String>) -> Self {
        let origin = origin.into();
        Self {
            origin: origin.trim_end_matches('/').to_string(),
            zoom,
            font_faces: font_faces.into(),
        }
    }
}

/// Progress reported by the pipeline driver
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineEvent {
    ChapterStarted {
        chapter: u32,
        chapter_count: usize,
        page_count: usize,
    },
    PageRendered {
        key: PageKey,
        path: PathBuf,
    },
    ChapterAssembled {
        chapter: u32,
        path: PathBuf,
        page_count: usize,
    },
    BookAssembled {
        path: PathBuf,
        page_count: usize,
    },
}

/// Result of a finished pipeline run
#[derive(Debug, Clone, PartialEq)]
pub struct BookSummary {
    pub book_file: PathBuf,
    pub chapters: usize,
    pub pages: usize,
}
