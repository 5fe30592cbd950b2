//! Pool of render workers sharing one job queue

use crate::render::PageRenderer;
use crate::types::*;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender, error::TryRecvError};
use tokio::task::JoinSet;

/// A transformed page waiting for a render surface
#[derive(Debug)]
pub(crate) struct PageJob {
    pub key: PageKey,
    pub document: String,
    pub path: PathBuf,
}

/// A page file on disk
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RenderedPage {
    pub key: PageKey,
    pub path: PathBuf,
}

/// Workers are aborted when the pool is dropped.
pub(crate) struct RenderPool {
    jobs: Option<UnboundedSender<PageJob>>,
    results: UnboundedReceiver<Result<RenderedPage>>,
    _workers: JoinSet<()>,
}

impl RenderPool {
    /// Spawn one worker per renderer
    pub fn spawn<R: PageRenderer>(renderers: Vec<R>) -> Self {
        let (job_tx, job_rx) = mpsc::unbounded_channel();
        let job_rx = Arc::new(Mutex::new(job_rx));
        let (result_tx, result_rx) = mpsc::unbounded_channel();

        let mut workers = JoinSet::new();
        for (id, renderer) in renderers.into_iter().enumerate() {
            workers.spawn(render_worker(
                id,
                renderer,
                Arc::clone(&job_rx),
                result_tx.clone(),
            ));
        }

        Self {
            jobs: Some(job_tx),
            results: result_rx,
            _workers: workers,
        }
    }

    pub fn submit(&self, job: PageJob) -> Result<()> {
        let key = job.key;
        self.jobs
            .as_ref()
            .and_then(|jobs| jobs.send(job).ok())
            .ok_or_else(|| BookError::Render {
                key,
                message: "render pool is no longer accepting pages".to_string(),
            })
    }

    /// Stop accepting jobs; workers exit once the queue drains.
    pub fn close(&mut self) {
        self.jobs = None;
    }

    /// Wait for the next finished page, in completion order.
    pub async fn next(&mut self) -> Result<RenderedPage> {
        match self.results.recv().await {
            Some(result) => result,
            None => Err(pool_stopped()),
        }
    }

    /// A finished page if one is ready, without waiting.
    pub fn try_next(&mut self) -> Result<Option<RenderedPage>> {
        match self.results.try_recv() {
            Ok(result) => result.map(Some),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(pool_stopped()),
        }
    }
}

fn pool_stopped() -> BookError {
    BookError::Source("render workers stopped before every page was rendered".to_string())
}

async fn render_worker<R: PageRenderer>(
    id: usize,
    mut renderer: R,
    jobs: Arc<Mutex<UnboundedReceiver<PageJob>>>,
    results: UnboundedSender<Result<RenderedPage>>,
) {
    loop {
        let job = jobs.lock().await.recv().await;
        let Some(job) = job else { break };

        log::debug!("Worker {} rendering page {}", id, job.key);
        let outcome = render_job(&mut renderer, job).await;
        let failed = outcome.is_err();
        if results.send(outcome).is_err() || failed {
            break;
        }
    }
}

async fn render_job<R: PageRenderer>(renderer: &mut R, job: PageJob) -> Result<RenderedPage> {
    let bytes = renderer
        .render(&job.document)
        .await
        .map_err(|e| BookError::Render {
            key: job.key,
            message: e.to_string(),
        })?;
    tokio::fs::write(&job.path, bytes).await?;

    Ok(RenderedPage {
        key: job.key,
        path: job.path,
    })
}
