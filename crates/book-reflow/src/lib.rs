pub mod assemble;
mod cache;
pub mod constants;
mod geometry;
mod options;
pub mod pipeline;
pub mod reflow;
mod render;
mod types;

pub use assemble::{InputPages, assemble, assemble_book, assemble_chapter, load_pdf, save_pdf};
pub use cache::{CacheLayout, book_pdf};
pub use geometry::extract_geometry;
pub use options::*;
pub use pipeline::{BookJob, run_pipeline};
pub use reflow::{reflow_page, reflow_with_geometry};
pub use render::{PageRenderer, PageSource, RenderError, SourceError};
pub use types::*;
