use book_capture::*;

#[test]
fn test_parse_everand_book_url() {
    let url = BookUrl::parse("https://www.everand.com/book/507416596/The-Midnight-Library").unwrap();
    assert_eq!(url.site(), Site::Everand);
    assert_eq!(url.host(), "www.everand.com");
    assert_eq!(url.id(), "507416596");
    assert_eq!(url.book_filename(), "The-Midnight-Library");
    assert_eq!(
        url.reader_url(),
        "https://www.everand.com/read/507416596/The-Midnight-Library"
    );
}

#[test]
fn test_parse_scribd_book_url_with_query() {
    let url = BookUrl::parse("https://www.scribd.com/book/123/Facebook-Marketing?ref=home").unwrap();
    assert_eq!(url.site(), Site::Scribd);
    assert_eq!(url.book_filename(), "Facebook-Marketing");
    // Only the path segment changes, not "book" inside the slug
    assert_eq!(
        url.reader_url(),
        "https://www.scribd.com/read/123/Facebook-Marketing?ref=home"
    );
}

#[test]
fn test_parse_reader_url() {
    let url = BookUrl::parse("https://www.scribd.com/read/42/Some-Title/").unwrap();
    assert_eq!(url.book_filename(), "Some-Title");
    assert_eq!(url.reader_url(), "https://www.scribd.com/read/42/Some-Title/");
}

#[test]
fn test_login_urls() {
    assert_eq!(Site::Everand.login_url(), "https://www.everand.com");
    assert_eq!(Site::Scribd.login_url(), "https://www.scribd.com/login");
}

#[test]
fn test_asset_origin() {
    let everand = BookUrl::parse("https://www.everand.com/book/1/A").unwrap();
    let scribd = BookUrl::parse("https://www.scribd.com/book/1/A").unwrap();
    assert_eq!(everand.asset_origin(), "https://www.scribd.com");
    assert_eq!(scribd.asset_origin(), "https://www.scribd.com");
}

#[test]
fn test_parse_rejects_unsupported() {
    for url in [
        "https://example.com/book/1/A",
        "ftp://www.scribd.com/book/1/A",
        "www.scribd.com/book/1/A",
        "https://www.scribd.com/document/1/A",
        "https://www.scribd.com/book/1",
        "https://www.scribd.com/book//A",
    ] {
        match BookUrl::parse(url) {
            Err(CaptureError::Unsupported(got)) => assert_eq!(got, url),
            other => panic!("Expected Unsupported for {}, got {:?}", url, other),
        }
    }
}
