use book_reflow::reflow::{box_declaration, page_rule};
use book_reflow::*;

const FONTS: &str = "@font-face { font-family: 'ff1'; src: url('/fonts/ff1.woff'); }";

fn scribd() -> ReflowContext {
    ReflowContext::new("https://www.scribd.com/", Zoom::default(), FONTS)
}

fn sample_page() -> String {
    concat!(
        r#"<div class="outer_page" style="width: 800.0px; height: 1200.0px;">"#,
        r#"<div class="newpage" data-colindex="0" style="left: 0px; top: 0px;">"#,
        r#"<img src="/images/p1.jpg">"#,
        r#"<span style="position: absolute; top: 12px; left: 40px;">First</span>"#,
        r#"<span style="position: absolute; top: 60px; left: 40px; font-size: 9px;">Second</span>"#,
        "</div></div>"
    )
    .to_string()
}

#[test]
fn test_page_rule_scenario() {
    let geometry = PageGeometry { width: 800.0, height: 1200.0 };
    let rule = page_rule(geometry, Zoom::default());
    assert!(rule.contains("size: 500.0px 750.0px"));
    assert_eq!(
        rule,
        "@page { size: 500.0px 750.0px; margin: 0; } @media print { html, body { height: 750.0px; width: 500.0px; } }"
    );
}

#[test]
fn test_box_declaration_uses_logical_size_and_zoom() {
    let geometry = PageGeometry { width: 800.0, height: 1200.0 };
    assert_eq!(
        box_declaration(geometry, Zoom::default()),
        "overflow: hidden; height: 1200.0px; width: 800.0px; white-space: nowrap; zoom: 0.625;"
    );
}

#[test]
fn test_zoom_rescales_page_only() {
    let geometry = PageGeometry { width: 800.0, height: 1200.0 };
    let half = Zoom::new(0.5).unwrap();

    assert!(page_rule(geometry, half).contains("size: 400.0px 600.0px"));
    let declaration = box_declaration(geometry, half);
    assert!(declaration.contains("height: 1200.0px; width: 800.0px;"));
    assert!(declaration.contains("zoom: 0.5;"));
}

#[test]
fn test_reflow_page_full_document() {
    let fragment = r#"<div style="width: 800.0px; height: 1200.0px;"><span style="position: absolute; top: 1px;">A</span></div>"#;
    let ctx = ReflowContext::new("https://www.everand.com", Zoom::default(), "");

    let document = reflow_page(fragment, &ctx).unwrap();
    assert_eq!(
        document,
        concat!(
            "<style>@page { size: 500.0px 750.0px; margin: 0; } @media print { html, body { height: 750.0px; width: 500.0px; } }</style>",
            r#"<div style="width: 800.0px; height: 1200.0px;">"#,
            r#"<span style="overflow: hidden; height: 1200.0px; width: 800.0px; white-space: nowrap; zoom: 0.625;">A</span>"#,
            "</div>"
        )
    );
}

#[test]
fn test_reflow_page_injects_fonts_into_style_block() {
    let document = reflow_page(&sample_page(), &scribd()).unwrap();
    assert!(document.starts_with("<style>@page {"));

    let style_end = document.find("</style>").unwrap();
    assert!(document[..style_end].ends_with(FONTS));
}

#[test]
fn test_reflow_page_rebases_sources() {
    let document = reflow_page(&sample_page(), &scribd()).unwrap();
    assert!(document.contains(r#"<img src="https://www.scribd.com/images/p1.jpg">"#));
    assert!(!document.contains(r#"src="/images"#));
}

#[test]
fn test_reflow_page_pins_every_absolute_block() {
    let document = reflow_page(&sample_page(), &scribd()).unwrap();
    assert!(!document.contains("position: absolute"));

    let pinned = r#"style="overflow: hidden; height: 1200.0px; width: 800.0px; white-space: nowrap; zoom: 0.625;">"#;
    assert_eq!(document.matches(pinned).count(), 2);
    assert!(document.contains(">First</span>"));
    assert!(document.contains(">Second</span>"));
}

#[test]
fn test_reflow_page_neutralizes_first_column_only() {
    let fragment = concat!(
        r#"<div style="width: 100px; height: 200px;">"#,
        r#"<div data-colindex="0" style="left: 0px;"></div>"#,
        r#"<div data-colindex="0" style="left: 50px;"></div>"#,
        r#"<div data-colindex="1" style="left: 50px;"></div>"#,
        "</div>"
    );
    let document = reflow_page(fragment, &scribd()).unwrap();
    assert_eq!(document.matches(r#"data-colindex="0" x="left: 0px;""#).count(), 1);
    assert_eq!(document.matches(r#"data-colindex="0" style="left: 50px;""#).count(), 1);
    assert_eq!(document.matches(r#"data-colindex="1" style="left: 50px;""#).count(), 1);
}

#[test]
fn test_reflow_page_without_column_marker() {
    let fragment = r#"<div style="width: 100px; height: 200px;"><p>plain</p></div>"#;
    let document = reflow_page(fragment, &scribd()).unwrap();
    assert!(document.ends_with(fragment));
}

#[test]
fn test_reflow_page_is_idempotent() {
    let once = reflow_page(&sample_page(), &scribd()).unwrap();
    let twice = reflow_page(&once, &scribd()).unwrap();
    assert_eq!(once, twice);
    assert_eq!(twice.matches("@page").count(), 1);
}

#[test]
fn test_reflow_page_is_idempotent_with_geometry_in_absolute_style() {
    let fragment = concat!(
        r#"<div class="page" style="position: absolute; width: 800.0px; height: 1200.0px;">"#,
        r#"<span style="position: absolute; top: 5px;">Text</span>"#,
        "</div>"
    );
    let once = reflow_page(fragment, &scribd()).unwrap();
    assert!(once.contains("size: 500.0px 750.0px"));

    let twice = reflow_page(&once, &scribd()).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn test_reflow_page_missing_geometry() {
    let result = reflow_page("<div><p>No size here</p></div>", &scribd());
    assert_eq!(result, Err(ExtractionError::Missing));
}

#[test]
fn test_reflow_with_geometry_skips_extraction() {
    let geometry = PageGeometry { width: 320.0, height: 480.0 };
    let document = reflow_with_geometry("<p>no size</p>", geometry, &scribd());
    assert!(document.contains("size: 200.0px 300.0px"));
    assert!(document.ends_with("<p>no size</p>"));
}
