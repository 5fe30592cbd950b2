//! Browser-side collaborators for the book pipeline: login, reader
//! navigation and print rendering over headless Chromium.

mod book_url;
mod browser;
mod dom;
mod download;
mod error;
mod reader;
mod renderer;
mod session;

pub use book_url::{BookUrl, Site};
pub use browser::{BrowserSession, LaunchMode};
pub use download::download_book;
pub use error::{CaptureError, Result};
pub use reader::ReaderSession;
pub use renderer::{ChromeRenderer, print_params};
pub use session::{SessionState, StoredCookie, login};
