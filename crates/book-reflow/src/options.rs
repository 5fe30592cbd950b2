use crate::cache::{CacheLayout, book_pdf};
use crate::constants::*;
use crate::types::*;
use std::path::PathBuf;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Download configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BookOptions {
    // Output
    pub output_dir: PathBuf,
    /// Overrides `<output_dir>/<book_filename>`
    pub cache_dir: Option<PathBuf>,
    pub keep_cache: bool,

    // Reflow
    pub zoom: Zoom,
    /// Overrides the book URL's origin when rebasing `src` references
    pub asset_origin: Option<String>,

    // Rendering
    pub workers: usize,
    pub viewport_width: u32,
    pub viewport_height: u32,
    pub chrome_executable: Option<PathBuf>,

    // Session
    pub session_file: PathBuf,
    pub user_agent: String,
    pub accept_language: String,

    // Navigation
    pub chapter_delay_ms: u64,
}

impl Default for BookOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            cache_dir: None,
            keep_cache: false,
            zoom: Zoom::default(),
            asset_origin: None,
            workers: 1,
            viewport_width: DEFAULT_VIEWPORT_WIDTH,
            viewport_height: DEFAULT_VIEWPORT_HEIGHT,
            chrome_executable: None,
            session_file: PathBuf::from(DEFAULT_SESSION_FILE),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept_language: DEFAULT_ACCEPT_LANGUAGE.to_string(),
            chapter_delay_ms: DEFAULT_CHAPTER_DELAY_MS,
        }
    }
}

impl BookOptions {
    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options = serde_json::from_slice(&bytes)
            .map_err(|e| BookError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| BookError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        Zoom::new(self.zoom.get())?;

        if self.workers == 0 {
            return Err(BookError::Config(
                "At least one render worker is required".to_string(),
            ));
        }

        if self.viewport_width == 0 || self.viewport_height == 0 {
            return Err(BookError::Config(format!(
                "Viewport must be non-empty, got {}x{}",
                self.viewport_width, self.viewport_height
            )));
        }

        if let Some(origin) = &self.asset_origin {
            if !(origin.starts_with("https://") || origin.starts_with("http://")) {
                return Err(BookError::Config(format!(
                    "Asset origin must be an http(s) URL, got {}",
                    origin
                )));
            }
        }

        Ok(())
    }

    /// Cache directory layout for a book
    pub fn cache_layout(&self, book_filename: &str) -> CacheLayout {
        match &self.cache_dir {
            Some(dir) => CacheLayout::new(dir),
            None => CacheLayout::for_book(&self.output_dir, book_filename),
        }
    }

    pub fn book_file(&self, book_filename: &str) -> PathBuf {
        book_pdf(&self.output_dir, book_filename)
    }
}
