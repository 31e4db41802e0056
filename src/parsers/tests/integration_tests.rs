use crate::error::{ExtractError, FetchError};
use crate::fetch::{Page, PageSource, StaticSource};
use crate::filter::Scope;
use crate::parsers::html::parse;
use crate::sidebar::{self, MatchRule};
use crate::{Extractor, ExtractorConfig};
use std::fs;
use url::Url;

const DOCS_PAGE: &str = r#"<!DOCTYPE html>
<html>
<body>
  <header><a href="/">Home</a><a href="https://github.com/molt">GitHub</a></header>
  <nav aria-label="Navigation">
    <a href="/a">Alpha</a>
    <a href="/b">Beta</a>
    <a href="/a#frag">Alpha again</a>
    <a href="mailto:x@y.com">Contact</a>
  </nav>
  <div id="toc">On this page
    <a href="/c">Gamma</a>
    <a href="/d">Delta</a>
  </div>
</body>
</html>"#;

const MKDOCS_PAGE: &str = r##"<!DOCTYPE html>
<html>
<body>
  <div class="md-sidebar md-sidebar--primary">
    <nav class="md-nav md-nav--primary">
      <label class="md-nav__title">Navigation</label>
      <ul class="md-nav__list">
        <li class="md-nav__item"><a class="md-nav__link" href="/">Home</a></li>
        <li class="md-nav__item"><a class="md-nav__link" href="/install/">Install</a></li>
        <li class="md-nav__item"><a class="md-nav__link" href="http://docs.molt.bot/config/">Config</a></li>
        <li class="md-nav__item"><a class="md-nav__link" href="https://github.com/molt">Source</a></li>
      </ul>
    </nav>
  </div>
  <div class="md-sidebar md-sidebar--secondary">
    <nav class="md-nav md-nav--secondary">
      <label class="md-nav__title">On this page</label>
      <a href="#one">One</a><a href="/install/#two">Two</a><a href="/install/#three">Three</a>
      <a href="/install/#four">Four</a><a href="/config/#five">Five</a><a href="/faq/">FAQ</a>
    </nav>
  </div>
</body>
</html>"##;

struct FailingSource;

impl PageSource for FailingSource {
    async fn fetch(&self, url: &Url) -> Result<Page, FetchError> {
        Err(FetchError::Status {
            url: url.to_string(),
            status: reqwest::StatusCode::NOT_FOUND,
        })
    }
}

fn extractor(out: &std::path::Path) -> Extractor {
    Extractor::new(ExtractorConfig::default()).with_output(out)
}

#[tokio::test]
async fn test_sidebar_links_written_in_first_seen_order() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("links.txt");

    let report = extractor(&out)
        .run(&StaticSource::new(DOCS_PAGE))
        .await
        .unwrap();

    assert_eq!(
        fs::read_to_string(&out).unwrap(),
        "https://docs.molt.bot/a\nhttps://docs.molt.bot/b\n"
    );
    assert_eq!(report.links().len(), 2);
    assert_eq!(report.extraction.duplicates, 1);
    assert_eq!(report.extraction.rejected.ignored_scheme, 1);
    assert!(report.sidebar.unwrap().contains("aria-label"));
}

#[tokio::test]
async fn test_no_candidate_leaves_previous_output() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("links.txt");
    fs::write(&out, "https://docs.molt.bot/old\n").unwrap();

    let err = extractor(&out)
        .run(&StaticSource::new("<html><body><p>No navigation here</p></body></html>"))
        .await
        .unwrap_err();

    assert!(matches!(err, ExtractError::NoCandidateFound { .. }));
    assert_eq!(
        fs::read_to_string(&out).unwrap(),
        "https://docs.molt.bot/old\n"
    );
}

#[tokio::test]
async fn test_fetch_failure_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("links.txt");

    let err = extractor(&out).run(&FailingSource).await.unwrap_err();

    assert_eq!(
        err.to_string(),
        "https://docs.molt.bot/ returned HTTP 404 Not Found"
    );
    assert!(!out.exists());
}

#[tokio::test]
async fn test_invalid_start_url() {
    let config = ExtractorConfig::new("not a url");
    let err = Extractor::new(config)
        .extract(&StaticSource::new(DOCS_PAGE))
        .await
        .unwrap_err();
    assert!(matches!(err, ExtractError::InvalidStartUrl { .. }));
}

#[tokio::test]
async fn test_primary_sidebar_beats_table_of_contents() {
    let report = Extractor::new(ExtractorConfig::default())
        .extract(&StaticSource::new(MKDOCS_PAGE))
        .await
        .unwrap();

    assert_eq!(
        report.links().urls(),
        vec![
            "https://docs.molt.bot/",
            "https://docs.molt.bot/install",
            "https://docs.molt.bot/config",
        ]
    );
}

#[test]
fn test_locate_reports_rule() {
    let doc = parse(DOCS_PAGE);
    let start = Url::parse("https://docs.molt.bot/").unwrap();
    let chosen = sidebar::locate(&doc, &start).unwrap();
    assert_eq!(chosen.matched_by, MatchRule::AriaLabel);
    assert_eq!(chosen.internal_link_count, 3);
}

#[tokio::test]
async fn test_page_scopes() {
    let source = StaticSource::new(DOCS_PAGE);
    let urls = |scope: Scope| {
        let source = source.clone();
        async move {
            let report = Extractor::new(ExtractorConfig::default())
                .with_scope(scope)
                .extract(&source)
                .await
                .unwrap();
            report
                .links()
                .urls()
                .into_iter()
                .map(str::to_string)
                .collect::<Vec<_>>()
        }
    };

    assert_eq!(
        urls(Scope::All).await,
        vec![
            "https://docs.molt.bot/",
            "https://github.com/molt",
            "https://docs.molt.bot/a",
            "https://docs.molt.bot/b",
            "https://docs.molt.bot/c",
            "https://docs.molt.bot/d",
        ]
    );
    assert_eq!(
        urls(Scope::Internal).await,
        vec![
            "https://docs.molt.bot/",
            "https://docs.molt.bot/a",
            "https://docs.molt.bot/b",
            "https://docs.molt.bot/c",
            "https://docs.molt.bot/d",
        ]
    );
    assert_eq!(urls(Scope::External).await, vec!["https://github.com/molt"]);
}

#[tokio::test]
async fn test_include_text_output() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("nav.txt");

    extractor(&out)
        .with_include_text(true)
        .run(&StaticSource::new(DOCS_PAGE))
        .await
        .unwrap();

    assert_eq!(
        fs::read_to_string(&out).unwrap(),
        "https://docs.molt.bot/a | Alpha\nhttps://docs.molt.bot/b | Beta\n"
    );
}

#[tokio::test]
async fn test_http_start_url_keeps_upgraded_links() {
    let report = Extractor::new(ExtractorConfig::new("http://docs.molt.bot/"))
        .extract(&StaticSource::new(DOCS_PAGE))
        .await
        .unwrap();
    assert_eq!(
        report.links().urls(),
        vec!["https://docs.molt.bot/a", "https://docs.molt.bot/b"]
    );
}

#[tokio::test]
async fn test_exclude_patterns_from_config() {
    let mut config = ExtractorConfig::default();
    config.filter.exclude_patterns = vec![r"/b$".to_string()];

    let report = Extractor::new(config)
        .extract(&StaticSource::new(DOCS_PAGE))
        .await
        .unwrap();
    assert_eq!(report.links().urls(), vec!["https://docs.molt.bot/a"]);
    assert_eq!(report.extraction.excluded, 1);
}
