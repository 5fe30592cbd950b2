//! Chromium lifecycle

use crate::error::{CaptureError, Result};
use crate::session::SessionState;
use book_reflow::BookOptions;
use chromiumoxide::cdp::browser_protocol::network::CookieParam;
use chromiumoxide::handler::viewport::Viewport;
use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use tokio::task::JoinHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchMode {
    /// Visible window, for logging in by hand
    Interactive,
    Headless,
}

/// A running browser plus the task driving its CDP connection
pub struct BrowserSession {
    browser: Browser,
    handler: JoinHandle<()>,
    cookies: Vec<CookieParam>,
}

impl BrowserSession {
    pub async fn launch(
        options: &BookOptions,
        mode: LaunchMode,
        session: Option<SessionState>,
    ) -> Result<Self> {
        let mut builder = BrowserConfig::builder()
            .window_size(options.viewport_width, options.viewport_height)
            .viewport(Viewport {
                width: options.viewport_width,
                height: options.viewport_height,
                device_scale_factor: None,
                emulating_mobile: false,
                is_landscape: false,
                has_touch: false,
            })
            .arg(format!("--user-agent={}", options.user_agent))
            .arg(format!("--accept-lang={}", options.accept_language))
            .arg("--ignore-certificate-errors");

        if mode == LaunchMode::Interactive {
            builder = builder.with_head();
        }
        if let Some(path) = &options.chrome_executable {
            builder = builder.chrome_executable(path);
        }

        let config = builder.build().map_err(CaptureError::Launch)?;
        let (browser, mut handler) = Browser::launch(config).await?;

        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    log::debug!("Browser handler error: {}", e);
                }
            }
        });

        let cookies = match session {
            Some(state) => state.to_params()?,
            None => Vec::new(),
        };
        log::debug!(
            "Launched {:?} browser with {} saved cookie(s)",
            mode,
            cookies.len()
        );

        Ok(Self {
            browser,
            handler,
            cookies,
        })
    }

    /// Open a blank tab carrying the saved session cookies
    pub async fn new_page(&self) -> Result<Page> {
        let page = self.browser.new_page("about:blank").await?;
        if !self.cookies.is_empty() {
            page.set_cookies(self.cookies.clone()).await?;
        }
        Ok(page)
    }

    /// Close the browser; failures are logged, not returned.
    pub async fn close(mut self) {
        if let Err(e) = self.browser.close().await {
            log::warn!("Failed to close browser: {}", e);
        }
        let _ = self.browser.wait().await;
        self.handler.abort();
    }
}
