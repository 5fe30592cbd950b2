//! Pipeline driver - capture, reflow, render and assemble a whole book
//!
//! Chapters are pulled from the [`PageSource`] strictly in order. Each page
//! is reflowed as soon as it is captured and queued on a pool of render
//! workers; finished pages are collected per chapter and assembled in page
//! order once the chapter is complete. The book is assembled last, in
//! chapter order. Any failure aborts the run.

mod collect;
mod pool;

use crate::assemble::{assemble_book, assemble_chapter};
use crate::cache::CacheLayout;
use crate::reflow::reflow_page;
use crate::render::{PageRenderer, PageSource};
use crate::types::*;
use collect::ChapterCollector;
use pool::{PageJob, RenderPool, RenderedPage};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::sync::mpsc::UnboundedSender;

/// Everything the driver needs to know about one book
#[derive(Debug, Clone)]
pub struct BookJob {
    /// Origin for rebasing root-relative `src` references
    pub origin: String,
    pub zoom: Zoom,
    pub layout: CacheLayout,
    pub book_file: PathBuf,
}

/// Download every chapter of `source` and write the book file.
///
/// One render worker is spawned per renderer. The cache directory must
/// already exist; cleaning it up is left to the caller.
pub async fn run_pipeline<S, R>(
    source: &mut S,
    renderers: Vec<R>,
    job: &BookJob,
    events: Option<&UnboundedSender<PipelineEvent>>,
) -> Result<BookSummary>
where
    S: PageSource,
    R: PageRenderer,
{
    if renderers.is_empty() {
        return Err(BookError::Config(
            "At least one renderer is required".to_string(),
        ));
    }

    let font_faces = source.font_faces().await?;
    let ctx = ReflowContext::new(job.origin.as_str(), job.zoom, font_faces);

    let chapter_count = source.chapter_count();
    if chapter_count == 0 {
        return Err(BookError::Source("Book has no chapters".to_string()));
    }

    let mut driver = Driver {
        layout: &job.layout,
        events,
        collector: ChapterCollector::new(),
        chapter_files: BTreeMap::new(),
        pages: 0,
    };
    let mut pool = RenderPool::spawn(renderers);

    for chapter in 1..=chapter_count as u32 {
        let fragments = source.next_chapter().await?.ok_or_else(|| {
            BookError::Source(format!(
                "Chapter {} of {} could not be loaded",
                chapter, chapter_count
            ))
        })?;
        if fragments.is_empty() {
            return Err(BookError::Source(format!("Chapter {} has no pages", chapter)));
        }

        log::info!(
            "Downloading chapter {}/{} ({} pages)",
            chapter,
            chapter_count,
            fragments.len()
        );
        driver.emit(PipelineEvent::ChapterStarted {
            chapter,
            chapter_count,
            page_count: fragments.len(),
        });

        for (index, fragment) in fragments.iter().enumerate() {
            let key = PageKey::new(chapter, index as u32 + 1);
            let document = reflow_page(fragment, &ctx)?;
            pool.submit(PageJob {
                key,
                document,
                path: job.layout.page_pdf(key),
            })?;
        }

        if let Some(pages) = driver.collector.expect(chapter, fragments.len()) {
            driver.finish_chapter(chapter, pages).await?;
        }
        while let Some(rendered) = pool.try_next()? {
            driver.page_done(rendered).await?;
        }
    }

    pool.close();
    while !driver.collector.is_empty() {
        let rendered = pool.next().await?;
        driver.page_done(rendered).await?;
    }

    log::info!("Merging {} chapters into {}", chapter_count, job.book_file.display());
    let chapter_files: Vec<PathBuf> = driver.chapter_files.into_values().collect();
    let pages = assemble_book(&chapter_files, &job.book_file).await?;
    check_page_total(&job.book_file, driver.pages, pages)?;
    if let Some(tx) = events {
        let _ = tx.send(PipelineEvent::BookAssembled {
            path: job.book_file.clone(),
            page_count: pages,
        });
    }

    Ok(BookSummary {
        book_file: job.book_file.clone(),
        chapters: chapter_files.len(),
        pages,
    })
}

fn check_page_total(
    path: &Path,
    expected: usize,
    found: usize,
) -> std::result::Result<(), AssemblyError> {
    if expected == found {
        Ok(())
    } else {
        Err(AssemblyError::PageTotal {
            path: path.to_path_buf(),
            expected,
            found,
        })
    }
}

struct Driver<'a> {
    layout: &'a CacheLayout,
    events: Option<&'a UnboundedSender<PipelineEvent>>,
    collector: ChapterCollector,
    chapter_files: BTreeMap<u32, PathBuf>,
    pages: usize,
}

impl Driver<'_> {
    fn emit(&self, event: PipelineEvent) {
        if let Some(tx) = self.events {
            // Nobody listening is fine
            let _ = tx.send(event);
        }
    }

    async fn page_done(&mut self, rendered: RenderedPage) -> Result<()> {
        let RenderedPage { key, path } = rendered;
        log::debug!("Rendered page {} -> {}", key, path.display());
        self.emit(PipelineEvent::PageRendered {
            key,
            path: path.clone(),
        });

        if let Some(pages) = self.collector.record(key.chapter, key.page, path) {
            self.finish_chapter(key.chapter, pages).await?;
        }
        Ok(())
    }

    async fn finish_chapter(&mut self, chapter: u32, pages: Vec<PathBuf>) -> Result<()> {
        let path = self.layout.chapter_pdf(chapter);
        let page_count = assemble_chapter(&pages, &path).await?;
        log::info!("Assembled chapter {} ({} pages)", chapter, page_count);

        self.pages += page_count;
        self.emit(PipelineEvent::ChapterAssembled {
            chapter,
            path: path.clone(),
            page_count,
        });
        self.chapter_files.insert(chapter, path);
        Ok(())
    }
}
