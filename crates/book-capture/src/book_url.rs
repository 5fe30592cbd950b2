//! Book URL parsing
//!
//! Book pages live at `https://<host>/book/<id>/<slug>`; the reader for the
//! same book is at `https://<host>/read/<id>/<slug>`.

use crate::error::{CaptureError, Result};

/// Reader assets on both sites are served relative to this origin
const ASSET_ORIGIN: &str = "https://www.scribd.com";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Site {
    Everand,
    Scribd,
}

impl Site {
    fn from_host(host: &str) -> Option<Self> {
        match host {
            "www.everand.com" => Some(Site::Everand),
            "www.scribd.com" => Some(Site::Scribd),
            _ => None,
        }
    }

    /// Page to open for an interactive login
    pub fn login_url(self) -> &'static str {
        match self {
            Site::Everand => "https://www.everand.com",
            Site::Scribd => "https://www.scribd.com/login",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookUrl {
    site: Site,
    scheme: String,
    host: String,
    id: String,
    slug: String,
    /// Anything after the slug, kept verbatim
    rest: String,
}

impl BookUrl {
    pub fn parse(url: &str) -> Result<Self> {
        let unsupported = || CaptureError::Unsupported(url.to_string());

        let (scheme, remainder) = url.split_once("://").ok_or_else(unsupported)?;
        if scheme != "https" && scheme != "http" {
            return Err(unsupported());
        }

        let mut segments = remainder.splitn(5, '/');
        let host = segments.next().unwrap_or_default();
        let kind = segments.next().unwrap_or_default();
        let id = segments.next().unwrap_or_default();
        let slug_and_query = segments.next().unwrap_or_default();
        let tail = segments.next();

        let site = Site::from_host(host).ok_or_else(unsupported)?;
        if kind != "book" && kind != "read" {
            return Err(unsupported());
        }

        let split = slug_and_query
            .find(['?', '#'])
            .unwrap_or(slug_and_query.len());
        let (slug, query) = slug_and_query.split_at(split);
        if id.is_empty() || slug.is_empty() {
            return Err(unsupported());
        }

        let rest = match tail {
            Some(tail) => format!("{}/{}", query, tail),
            None => query.to_string(),
        };

        Ok(Self {
            site,
            scheme: scheme.to_string(),
            host: host.to_string(),
            id: id.to_string(),
            slug: slug.to_string(),
            rest,
        })
    }

    pub fn site(&self) -> Site {
        self.site
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Name of the cache directory and the book file
    pub fn book_filename(&self) -> &str {
        &self.slug
    }

    pub fn reader_url(&self) -> String {
        format!(
            "{}://{}/read/{}/{}{}",
            self.scheme, self.host, self.id, self.slug, self.rest
        )
    }

    /// Origin root-relative `src` references are resolved against
    pub fn asset_origin(&self) -> &'static str {
        ASSET_ORIGIN
    }
}
