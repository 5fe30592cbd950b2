//! Fan-in of rendered pages into complete chapters

use std::collections::BTreeMap;
use std::path::PathBuf;

#[derive(Debug, Default)]
struct PendingChapter {
    expected: Option<usize>,
    pages: BTreeMap<u32, PathBuf>,
}

impl PendingChapter {
    fn is_complete(&self) -> bool {
        self.expected == Some(self.pages.len())
    }
}

/// Tracks which pages of each chapter have been rendered. A chapter is
/// released, in page order, once its expected count is known and met.
#[derive(Debug, Default)]
pub(crate) struct ChapterCollector {
    pending: BTreeMap<u32, PendingChapter>,
}

impl ChapterCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare how many pages `chapter` has.
    pub fn expect(&mut self, chapter: u32, page_count: usize) -> Option<Vec<PathBuf>> {
        self.pending.entry(chapter).or_default().expected = Some(page_count);
        self.take_if_complete(chapter)
    }

    /// Record a rendered page; returns the chapter's files once all are in.
    pub fn record(&mut self, chapter: u32, page: u32, path: PathBuf) -> Option<Vec<PathBuf>> {
        self.pending
            .entry(chapter)
            .or_default()
            .pages
            .insert(page, path);
        self.take_if_complete(chapter)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    fn take_if_complete(&mut self, chapter: u32) -> Option<Vec<PathBuf>> {
        if !self.pending.get(&chapter)?.is_complete() {
            return None;
        }
        self.pending
            .remove(&chapter)
            .map(|done| done.pages.into_values().collect())
    }
}
