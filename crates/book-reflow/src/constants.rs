//! Shared constants for page capture and reflow

// =============================================================================
// Reflow
// =============================================================================

/// Reader-to-print scale factor
pub const DEFAULT_ZOOM: f64 = 0.625;

/// Attribute that pins a column container in place; renamed to a no-op attribute
pub const COLUMN_MARKER: &str = r#"data-colindex="0" style=""#;

/// Replacement for [`COLUMN_MARKER`]
pub const COLUMN_MARKER_NEUTRALIZED: &str = r#"data-colindex="0" x=""#;

// =============================================================================
// Rendering surface
// =============================================================================

/// Viewport width of capture and render tabs (pixels)
pub const DEFAULT_VIEWPORT_WIDTH: u32 = 1200;

/// Viewport height of capture and render tabs (pixels)
pub const DEFAULT_VIEWPORT_HEIGHT: u32 = 1600;

/// Pause after requesting the next chapter (milliseconds)
pub const DEFAULT_CHAPTER_DELAY_MS: u64 = 1000;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/66.0.3359.181 Safari/537.36";

pub const DEFAULT_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";

pub const DEFAULT_SESSION_FILE: &str = "session.json";

// =============================================================================
// Files
// =============================================================================

pub const PDF_EXTENSION: &str = "pdf";

/// PDF version written by the assembler
pub const OUTPUT_PDF_VERSION: &str = "1.5";
