//! Print-to-PDF render surface

use crate::browser::BrowserSession;
use crate::error::Result;
use book_reflow::{PageRenderer, RenderError};
use chromiumoxide::Page;
use chromiumoxide::cdp::browser_protocol::page::PrintToPdfParams;

/// One browser tab used as a print surface
pub struct ChromeRenderer {
    page: Page,
}

impl ChromeRenderer {
    pub async fn new(browser: &BrowserSession) -> Result<Self> {
        Ok(Self {
            page: browser.new_page().await?,
        })
    }
}

/// Page size comes from the document's `@page` rule
pub fn print_params() -> PrintToPdfParams {
    PrintToPdfParams::builder()
        .prefer_css_page_size(true)
        .margin_top(0.0)
        .margin_bottom(0.0)
        .margin_left(0.0)
        .margin_right(0.0)
        .build()
}

impl PageRenderer for ChromeRenderer {
    async fn render(&mut self, document: &str) -> std::result::Result<Vec<u8>, RenderError> {
        self.page
            .set_content(document)
            .await
            .map_err(|e| RenderError(format!("failed to load page content: {}", e)))?;

        self.page
            .pdf(print_params())
            .await
            .map_err(|e| RenderError(format!("failed to print page: {}", e)))
    }
}
