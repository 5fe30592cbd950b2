//! Reader UI navigation
//!
//! The reader shows one chapter at a time. After switching to vertical
//! (scrolling) mode every page of the current chapter is a
//! `div.vertical_page`, and a "load next" button moves on to the next one.

use crate::book_url::BookUrl;
use crate::dom::{self, DEFAULT_WAIT_TIMEOUT, WaitState};
use crate::error::{CaptureError, Result};
use book_reflow::{BookOptions, PageSource, SourceError};
use chromiumoxide::Page;
use std::time::Duration;

const BROWSER_LIMIT_TEXT: &str = "Browser limit exceeded";
const FONT_FACES: &str = "#fontfaces";
const DISPLAY_SETTINGS: &str = ".icon-ic_displaysettings";
const VERTICAL_MODE: &str = ".vertical_mode_btn";
const TOC: &str = ".icon-ic_toc_list";
const CHAPTER_ENTRY: &str = r#"li.text_btn[role="none"]"#;
const FIRST_CHAPTER: &str = r#"li.text_btn[data-idx="0"]"#;
const PAGE: &str = "div.vertical_page";
const FIRST_PAGE: &str = r#"div.vertical_page[data-page="0"]"#;
const LOAD_NEXT: &str = "button.load_next_btn";

pub struct ReaderSession {
    page: Page,
    font_faces: String,
    chapter_count: usize,
    /// Chapters already handed out
    delivered: usize,
    chapter_delay: Duration,
}

impl ReaderSession {
    /// Open the book in the reader and position it on the first chapter
    pub async fn open(page: Page, url: &BookUrl, options: &BookOptions) -> Result<Self> {
        let reader_url = url.reader_url();
        log::info!("Opening {}", reader_url);
        page.goto(reader_url).await?;

        if page.content().await?.contains(BROWSER_LIMIT_TEXT) {
            return Err(CaptureError::BrowserLimit);
        }

        let timeout = Some(DEFAULT_WAIT_TIMEOUT);
        dom::wait_for(&page, FONT_FACES, WaitState::Attached, timeout).await?;
        let font_faces = dom::inner_html(&page, FONT_FACES).await?;

        dom::wait_for(&page, DISPLAY_SETTINGS, WaitState::Visible, timeout).await?;
        dom::click(&page, DISPLAY_SETTINGS).await?;
        dom::wait_for(&page, VERTICAL_MODE, WaitState::Visible, timeout).await?;
        dom::click(&page, VERTICAL_MODE).await?;
        dom::wait_for(&page, FIRST_PAGE, WaitState::Visible, timeout).await?;

        dom::click(&page, TOC).await?;
        dom::wait_for(&page, CHAPTER_ENTRY, WaitState::Visible, timeout).await?;
        let chapter_count = dom::count(&page, CHAPTER_ENTRY).await?;
        dom::click(&page, FIRST_CHAPTER).await?;
        log::info!("Book has {} chapters", chapter_count);

        Ok(Self {
            page,
            font_faces,
            chapter_count,
            delivered: 0,
            chapter_delay: Duration::from_millis(options.chapter_delay_ms),
        })
    }

    async fn capture_chapter(&mut self) -> Result<Option<Vec<String>>> {
        if self.delivered >= self.chapter_count {
            return Ok(None);
        }

        dom::wait_for(
            &self.page,
            FIRST_PAGE,
            WaitState::Attached,
            Some(DEFAULT_WAIT_TIMEOUT),
        )
        .await?;
        let pages = dom::inner_html_all(&self.page, PAGE).await?;
        self.delivered += 1;

        if self.delivered < self.chapter_count {
            dom::click(&self.page, LOAD_NEXT).await?;
            tokio::time::sleep(self.chapter_delay).await;
        }
        Ok(Some(pages))
    }
}

impl PageSource for ReaderSession {
    async fn font_faces(&mut self) -> std::result::Result<String, SourceError> {
        Ok(self.font_faces.clone())
    }

    fn chapter_count(&self) -> usize {
        self.chapter_count
    }

    async fn next_chapter(&mut self) -> std::result::Result<Option<Vec<String>>, SourceError> {
        Ok(self.capture_chapter().await?)
    }
}
