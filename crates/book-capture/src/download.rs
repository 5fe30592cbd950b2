//! End-to-end download of one book

use crate::book_url::BookUrl;
use crate::browser::{BrowserSession, LaunchMode};
use crate::error::{CaptureError, Result};
use crate::reader::ReaderSession;
use crate::renderer::ChromeRenderer;
use crate::session::SessionState;
use book_reflow::{BookJob, BookOptions, BookSummary, PipelineEvent, run_pipeline};
use tokio::sync::mpsc::UnboundedSender;

/// Capture, render and merge `url` into `<output_dir>/<book_filename>.pdf`.
///
/// Needs a saved session (see [`crate::login`]). The cache directory is
/// purged after success unless `keep_cache` is set, and kept on failure.
pub async fn download_book(
    url: &BookUrl,
    options: &BookOptions,
    events: Option<&UnboundedSender<PipelineEvent>>,
) -> Result<BookSummary> {
    options.validate()?;

    let book_filename = url.book_filename();
    let layout = options.cache_layout(book_filename);
    layout.create().await?;

    let job = BookJob {
        origin: options
            .asset_origin
            .clone()
            .unwrap_or_else(|| url.asset_origin().to_string()),
        zoom: options.zoom,
        layout,
        book_file: options.book_file(book_filename),
    };

    let session = SessionState::load(&options.session_file).await?;
    if session.is_none() {
        log::warn!(
            "No saved session at {}, continuing signed out",
            options.session_file.display()
        );
    }
    let browser = BrowserSession::launch(options, LaunchMode::Headless, session).await?;

    let outcome = async {
        let mut reader = ReaderSession::open(browser.new_page().await?, url, options).await?;

        let mut renderers = Vec::with_capacity(options.workers);
        for _ in 0..options.workers {
            renderers.push(ChromeRenderer::new(&browser).await?);
        }

        Ok::<_, CaptureError>(run_pipeline(&mut reader, renderers, &job, events).await?)
    }
    .await;
    browser.close().await;

    let summary = match outcome {
        Ok(summary) => summary,
        Err(e) => {
            log::info!(
                "Keeping partial downloads in {}",
                job.layout.cache_dir().display()
            );
            return Err(e);
        }
    };

    if options.keep_cache {
        log::info!("Cache kept at {}", job.layout.cache_dir().display());
    } else if let Err(e) = job.layout.purge().await {
        log::warn!(
            "Failed to remove cache {}: {}",
            job.layout.cache_dir().display(),
            e
        );
    }

    Ok(summary)
}
