//! Persisted login session
//!
//! After an interactive login the browser's cookies are written to a JSON
//! file; later headless runs restore them into every new tab.

use crate::book_url::BookUrl;
use crate::browser::{BrowserSession, LaunchMode};
use crate::dom::{self, WaitState};
use crate::error::{CaptureError, Result};
use book_reflow::BookOptions;
use chromiumoxide::cdp::browser_protocol::network::{Cookie, CookieParam};
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::Path;

/// Marker present on both sites once a user is signed in
const LOGGED_IN_SELECTOR: &str = "div.user_row";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredCookie {
    pub name: String,
    pub value: String,
    pub domain: String,
    pub path: String,
    #[serde(default)]
    pub secure: bool,
    #[serde(default)]
    pub http_only: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub cookies: Vec<StoredCookie>,
}

impl SessionState {
    /// Load a saved session; a missing file yields `None`.
    pub async fn load(path: impl AsRef<Path>) -> Result<Option<Self>> {
        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_slice(&bytes)?))
    }

    pub async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    pub fn from_cookies(cookies: Vec<Cookie>) -> Self {
        Self {
            cookies: cookies
                .into_iter()
                .map(|c| StoredCookie {
                    name: c.name,
                    value: c.value,
                    domain: c.domain,
                    path: c.path,
                    secure: c.secure,
                    http_only: c.http_only,
                })
                .collect(),
        }
    }

    pub fn to_params(&self) -> Result<Vec<CookieParam>> {
        self.cookies
            .iter()
            .map(|c| {
                CookieParam::builder()
                    .name(c.name.clone())
                    .value(c.value.clone())
                    .domain(c.domain.clone())
                    .path(c.path.clone())
                    .secure(c.secure)
                    .http_only(c.http_only)
                    .build()
                    .map_err(CaptureError::Cookie)
            })
            .collect()
    }
}

/// Open a visible browser on the site's login page and wait, without a
/// timeout, until the user is signed in. The resulting cookies are saved to
/// `options.session_file`.
pub async fn login(url: &BookUrl, options: &BookOptions) -> Result<SessionState> {
    let saved = SessionState::load(&options.session_file).await?;
    let browser = BrowserSession::launch(options, LaunchMode::Interactive, saved).await?;

    let outcome = async {
        let page = browser.new_page().await?;
        page.goto(url.site().login_url()).await?;
        dom::wait_for(&page, LOGGED_IN_SELECTOR, WaitState::Attached, None).await?;
        log::info!("Logged in successfully.");

        let state = SessionState::from_cookies(page.get_cookies().await?);
        state.save(&options.session_file).await?;
        Ok::<_, CaptureError>(state)
    }
    .await;

    browser.close().await;
    outcome
}
