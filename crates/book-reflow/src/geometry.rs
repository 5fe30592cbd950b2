//! Page geometry extraction

use crate::types::{ExtractionError, PageGeometry};
use regex::Regex;
use std::sync::LazyLock;

static GEOMETRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"width: ([0-9.]+)px; height: ([0-9.]+)px;").expect("geometry pattern is valid")
});

static PINNED_BOX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"overflow: hidden; height: ([0-9.]+)px; width: ([0-9.]+)px;")
        .expect("pinned box pattern is valid")
});

/// Extract the page's intended size from the first `width: Wpx; height: Hpx;`
/// declaration in the fragment.
pub fn extract_geometry(fragment: &str) -> Result<PageGeometry, ExtractionError> {
    let captures = GEOMETRY
        .captures(fragment)
        .ok_or(ExtractionError::Missing)?;

    Ok(PageGeometry {
        width: parse_dimension(&captures[1])?,
        height: parse_dimension(&captures[2])?,
    })
}

/// Recover the geometry from a box a previous reflow already pinned.
///
/// Pinning rewrites `position: absolute` styles, which may have carried the
/// only `width/height` declaration, so this reads it back from the pinned
/// `height/width` pair instead.
pub(crate) fn pinned_geometry(html: &str) -> Option<Result<PageGeometry, ExtractionError>> {
    let captures = PINNED_BOX.captures(html)?;
    Some(parse_dimension(&captures[2]).and_then(|width| {
        Ok(PageGeometry {
            width,
            height: parse_dimension(&captures[1])?,
        })
    }))
}

fn parse_dimension(value: &str) -> Result<f64, ExtractionError> {
    match value.parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => Ok(v),
        _ => Err(ExtractionError::Malformed {
            value: value.to_string(),
        }),
    }
}
