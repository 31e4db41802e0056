use crate::error::ExtractError;
use crate::fetch::Page;
use crate::parsers::{ParserType, parse_page};
use url::Url;

fn page(content_type: Option<&str>, body: &str) -> Page {
    Page {
        url: Url::parse("https://docs.molt.bot/").unwrap(),
        status: 200,
        content_type: content_type.map(str::to_string),
        body: body.to_string(),
    }
}

#[test]
fn test_content_type_classification() {
    let types = [
        (None, ParserType::Html),
        (Some("text/html"), ParserType::Html),
        (Some("text/html; charset=utf-8"), ParserType::Html),
        (Some("application/xhtml+xml"), ParserType::Html),
        (Some("TEXT/HTML"), ParserType::Html),
        (Some("text/plain"), ParserType::Html),
        (Some("application/json"), ParserType::Other),
        (Some("image/png"), ParserType::Other),
        (Some("application/pdf"), ParserType::Other),
    ];

    for (content_type, expected) in types {
        assert_eq!(
            ParserType::from_content_type(content_type),
            expected,
            "Content-Type {:?} should be {:?}",
            content_type,
            expected
        );
    }
}

#[test]
fn test_parse_page_accepts_html() {
    let doc = parse_page(&page(Some("text/html"), "<html><body><nav></nav></body></html>")).unwrap();
    assert_eq!(doc.root_element().value().name(), "html");
}

#[test]
fn test_parse_page_rejects_empty_body() {
    let err = parse_page(&page(Some("text/html"), "  \n ")).unwrap_err();
    match err {
        ExtractError::Parse { url, reason } => {
            assert_eq!(url, "https://docs.molt.bot/");
            assert_eq!(reason, "empty response body");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_parse_page_rejects_error_status() {
    let mut error_page = page(Some("text/html"), "<html><body><nav></nav></body></html>");
    error_page.status = 503;
    let err = parse_page(&error_page).unwrap_err();
    assert!(err.to_string().contains("page was served with HTTP 503"));
}

#[test]
fn test_parse_page_rejects_non_html() {
    let err = parse_page(&page(Some("application/json"), "{\"ok\": true}")).unwrap_err();
    assert!(err.to_string().contains("unsupported content type application/json"));
}
