//! Small DOM helpers evaluated in the page

use crate::error::{CaptureError, Result};
use chromiumoxide::Page;
use chromiumoxide::cdp::js_protocol::runtime::EvaluateParams;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tokio::time::Instant;

/// Default wait for reader controls to show up
pub const DEFAULT_WAIT_TIMEOUT: Duration = Duration::from_secs(30);

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Consecutive failed polls tolerated while a page navigates
const MAX_POLL_ERRORS: u32 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitState {
    /// Present in the DOM
    Attached,
    /// Present and laid out with a non-empty box
    Visible,
}

/// Evaluate `expression` and decode its value
pub async fn eval<T: DeserializeOwned>(page: &Page, expression: String) -> Result<T> {
    let mut params = EvaluateParams::new(expression);
    params.return_by_value = Some(true);
    params.await_promise = Some(true);

    let result = page.evaluate_expression(params).await?;
    Ok(result.into_value()?)
}

/// Wait until `selector` reaches `state`; `None` waits forever.
pub async fn wait_for(
    page: &Page,
    selector: &str,
    state: WaitState,
    timeout: Option<Duration>,
) -> Result<()> {
    let expression = match state {
        WaitState::Attached => format!("document.querySelector({}) !== null", js_string(selector)),
        WaitState::Visible => format!(
            "(() => {{ const el = document.querySelector({}); if (!el) return false; \
             const r = el.getBoundingClientRect(); return r.width > 0 && r.height > 0; }})()",
            js_string(selector)
        ),
    };

    let started = Instant::now();
    let mut polls = PollErrors::default();
    loop {
        if polls.check(selector, eval::<bool>(page, expression.clone()).await)? {
            return Ok(());
        }
        if let Some(timeout) = timeout {
            if started.elapsed() >= timeout {
                return Err(CaptureError::Timeout {
                    selector: selector.to_string(),
                    timeout,
                });
            }
        }
        tokio::time::sleep(POLL_INTERVAL).await;
    }
}

/// Evaluation fails while the page is between documents, e.g. a login
/// redirect. Such polls count as "not yet" until too many fail in a row.
#[derive(Debug, Default)]
struct PollErrors {
    consecutive: u32,
}

impl PollErrors {
    fn check(&mut self, selector: &str, result: Result<bool>) -> Result<bool> {
        match result {
            Ok(found) => {
                self.consecutive = 0;
                Ok(found)
            }
            Err(e) if self.consecutive < MAX_POLL_ERRORS => {
                self.consecutive += 1;
                log::debug!("Polling `{}` failed, retrying: {}", selector, e);
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }
}

/// Click the first element matching `selector` from script
pub async fn click(page: &Page, selector: &str) -> Result<()> {
    let expression = format!(
        "(() => {{ const el = document.querySelector({}); if (!el) return false; el.click(); return true; }})()",
        js_string(selector)
    );
    if eval::<bool>(page, expression).await? {
        Ok(())
    } else {
        Err(CaptureError::NotFound(selector.to_string()))
    }
}

pub async fn count(page: &Page, selector: &str) -> Result<usize> {
    eval(
        page,
        format!("document.querySelectorAll({}).length", js_string(selector)),
    )
    .await
}

pub async fn inner_html(page: &Page, selector: &str) -> Result<String> {
    let expression = format!(
        "(() => {{ const el = document.querySelector({}); return el ? el.innerHTML : null; }})()",
        js_string(selector)
    );
    eval::<Option<String>>(page, expression)
        .await?
        .ok_or_else(|| CaptureError::NotFound(selector.to_string()))
}

/// Inner HTML of every match, in document order
pub async fn inner_html_all(page: &Page, selector: &str) -> Result<Vec<String>> {
    eval(
        page,
        format!(
            "Array.from(document.querySelectorAll({})).map(el => el.innerHTML)",
            js_string(selector)
        ),
    )
    .await
}

/// Quote `value` as a JavaScript string literal
fn js_string(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poll_errors_retry_until_budget_spent() {
        let mut polls = PollErrors::default();
        for _ in 0..MAX_POLL_ERRORS {
            let result = polls.check("div.user_row", Err(CaptureError::NotFound("ctx".into())));
            assert!(matches!(result, Ok(false)));
        }
        let result = polls.check("div.user_row", Err(CaptureError::NotFound("ctx".into())));
        assert!(matches!(result, Err(CaptureError::NotFound(_))));
    }

    #[test]
    fn test_poll_errors_reset_after_success() {
        let mut polls = PollErrors::default();
        for _ in 0..MAX_POLL_ERRORS {
            polls.check("a", Err(CaptureError::NotFound("ctx".into()))).unwrap();
        }
        assert!(!polls.check("a", Ok(false)).unwrap());
        assert!(matches!(
            polls.check("a", Err(CaptureError::NotFound("ctx".into()))),
            Ok(false)
        ));
        assert!(polls.check("a", Ok(true)).unwrap());
    }

    #[test]
    fn test_js_string_escapes_quotes() {
        assert_eq!(
            js_string(r#"div.vertical_page[data-page="0"]"#),
            r#""div.vertical_page[data-page=\"0\"]""#
        );
        assert_eq!(js_string("#fontfaces"), r##""#fontfaces""##);
    }
}
