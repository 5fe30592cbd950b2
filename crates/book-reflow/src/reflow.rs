//! Page reflow - turning a captured page fragment into a print-sized document
//!
//! The rewrite runs in a fixed order:
//! 1. Rebase root-relative `src` references onto the book's origin
//! 2. Neutralize the first column marker
//! 3. Pin every absolutely positioned block to the page box
//! 4. Prepend an `@page` rule and the book's font faces

use crate::constants::{COLUMN_MARKER, COLUMN_MARKER_NEUTRALIZED};
use crate::geometry::{extract_geometry, pinned_geometry};
use crate::types::{ExtractionError, PageGeometry, ReflowContext, Zoom};
use regex::{Captures, NoExpand, Regex};
use std::borrow::Cow;
use std::sync::LazyLock;

static ROOT_RELATIVE_SRC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"src="/([^/])"#).expect("src pattern is valid"));

static ABSOLUTE_POSITION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"position: absolute.*?""#).expect("position pattern is valid"));

static LEADING_PAGE_STYLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\A<style>@page \{(?s:.*?)</style>").expect("page style pattern is valid")
});

/// Extract the fragment's geometry and reflow it into a standalone document.
pub fn reflow_page(fragment: &str, ctx: &ReflowContext) -> Result<String, ExtractionError> {
    let fragment = strip_page_style(fragment);
    // An already reflowed page is sized from its own pinned boxes
    let geometry = match &fragment {
        Cow::Owned(html) => pinned_geometry(html).unwrap_or_else(|| extract_geometry(html)),
        Cow::Borrowed(html) => extract_geometry(html),
    }?;
    Ok(compose(&fragment, geometry, ctx))
}

/// Reflow a fragment whose geometry is already known.
pub fn reflow_with_geometry(fragment: &str, geometry: PageGeometry, ctx: &ReflowContext) -> String {
    compose(&strip_page_style(fragment), geometry, ctx)
}

fn compose(fragment: &str, geometry: PageGeometry, ctx: &ReflowContext) -> String {
    let html = rebase_sources(fragment, &ctx.origin);
    let html = neutralize_column_marker(&html);
    let html = pin_absolute_blocks(&html, geometry, ctx.zoom);

    format!(
        "<style>{}{}</style>{}",
        page_rule(geometry, ctx.zoom),
        ctx.font_faces,
        html
    )
}

/// The `@page` and print-media rule sizing the output page to `W·zoom × H·zoom`.
pub fn page_rule(geometry: PageGeometry, zoom: Zoom) -> String {
    let (width, height) = geometry.scaled(zoom);
    format!(
        "@page {{ size: {w}px {h}px; margin: 0; }} @media print {{ html, body {{ height: {h}px; width: {w}px; }} }}",
        w = css_number(width),
        h = css_number(height),
    )
}

/// Inline style replacing every absolute-positioning block.
pub fn box_declaration(geometry: PageGeometry, zoom: Zoom) -> String {
    format!(
        "overflow: hidden; height: {}px; width: {}px; white-space: nowrap; zoom: {};",
        css_number(geometry.height),
        css_number(geometry.width),
        css_number(zoom.get())
    )
}

fn rebase_sources<'a>(html: &'a str, origin: &str) -> Cow<'a, str> {
    ROOT_RELATIVE_SRC.replace_all(html, |caps: &Captures| format!("src=\"{}/{}", origin, &caps[1]))
}

// Only the first column container is touched.
fn neutralize_column_marker(html: &str) -> String {
    html.replacen(COLUMN_MARKER, COLUMN_MARKER_NEUTRALIZED, 1)
}

fn pin_absolute_blocks<'a>(html: &'a str, geometry: PageGeometry, zoom: Zoom) -> Cow<'a, str> {
    let replacement = format!("{}\"", box_declaration(geometry, zoom));
    ABSOLUTE_POSITION.replace_all(html, NoExpand(&replacement))
}

fn strip_page_style(fragment: &str) -> Cow<'_, str> {
    LEADING_PAGE_STYLE.replace(fragment, "")
}

/// Floats always keep a fractional part (`500.0`, `0.625`).
fn css_number(value: f64) -> String {
    format!("{:?}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_number_keeps_fraction() {
        assert_eq!(css_number(500.0), "500.0");
        assert_eq!(css_number(0.625), "0.625");
        assert_eq!(css_number(612.5), "612.5");
    }

    #[test]
    fn test_rebase_sources_skips_protocol_relative() {
        let html = r#"<img src="/a.png"><img src="//cdn.example/b.png"><img src="https://x/c.png">"#;
        assert_eq!(
            rebase_sources(html, "https://www.scribd.com"),
            r#"<img src="https://www.scribd.com/a.png"><img src="//cdn.example/b.png"><img src="https://x/c.png">"#
        );
    }

    #[test]
    fn test_neutralize_column_marker_first_only() {
        let html = r#"<div data-colindex="0" style="left: 0"></div><div data-colindex="0" style="left: 9"></div>"#;
        assert_eq!(
            neutralize_column_marker(html),
            r#"<div data-colindex="0" x="left: 0"></div><div data-colindex="0" style="left: 9"></div>"#
        );
    }

    #[test]
    fn test_neutralize_column_marker_absent() {
        let html = r#"<div data-colindex="1" style="left: 0"></div>"#;
        assert_eq!(neutralize_column_marker(html), html);
    }

    #[test]
    fn test_strip_page_style_only_leading() {
        let html = "<style>@page { size: 1px 1px; }</style><p>x</p>";
        assert_eq!(strip_page_style(html), "<p>x</p>");

        let html = "<p>x</p><style>@page { size: 1px 1px; }</style>";
        assert_eq!(strip_page_style(html), html);
    }
}
