use book_reflow::*;

#[test]
fn test_extract_geometry_scenario() {
    let fragment = r#"<div style="width: 800.0px; height: 1200.0px;">...</div>"#;
    let geometry = extract_geometry(fragment).unwrap();
    assert_eq!(geometry.width, 800.0);
    assert_eq!(geometry.height, 1200.0);
}

#[test]
fn test_extract_geometry_ignores_surrounding_markup() {
    let fragment = concat!(
        r#"<section class="outer_page" data-page="3">"#,
        r#"<div class="text_layer" style="position: relative; width: 612.5px; height: 792px; left: 0px;">"#,
        r#"<span style="position: absolute; top: 10px; left: 4px;">Chapter One</span>"#,
        "</div></section>"
    );
    let geometry = extract_geometry(fragment).unwrap();
    assert_eq!(geometry, PageGeometry { width: 612.5, height: 792.0 });
}

#[test]
fn test_extract_geometry_uses_first_declaration() {
    let fragment = concat!(
        r#"<div style="width: 800px; height: 1200px;">"#,
        r#"<img style="width: 40px; height: 30px;">"#,
        "</div>"
    );
    let geometry = extract_geometry(fragment).unwrap();
    assert_eq!(geometry, PageGeometry { width: 800.0, height: 1200.0 });
}

#[test]
fn test_extract_geometry_missing() {
    let result = extract_geometry(r#"<div style="height: 1200px; width: 800px;">x</div>"#);
    assert_eq!(result, Err(ExtractionError::Missing));

    let result = extract_geometry("");
    assert_eq!(result, Err(ExtractionError::Missing));
}

#[test]
fn test_extract_geometry_malformed() {
    let result = extract_geometry(r#"<div style="width: 8.0.0px; height: 1200px;">"#);
    match result {
        Err(ExtractionError::Malformed { value }) => assert_eq!(value, "8.0.0"),
        other => panic!("Expected Malformed error, got {:?}", other),
    }

    let result = extract_geometry(r#"<div style="width: 0px; height: 1200px;">"#);
    assert!(matches!(result, Err(ExtractionError::Malformed { .. })));
}
