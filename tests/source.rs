use std::path::PathBuf;

use phosphor_uikit::config::Style;
use phosphor_uikit::error::Error;
use phosphor_uikit::source::{svg_file_name, PhosphorSources, SourceProvider, REMOTE_BASE_URL};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn write(path: &PathBuf, content: &str) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

#[test]
fn file_names_follow_phosphor_layout() {
    assert_eq!(svg_file_name("person", Style::Regular), "person.svg");
    assert_eq!(svg_file_name("person", Style::Bold), "person-bold.svg");
    assert_eq!(svg_file_name("arrow-left", Style::Duotone), "arrow-left-duotone.svg");
}

#[test]
fn remote_url_is_keyed_by_style_and_name() {
    let tmp = tempfile::tempdir().unwrap();
    let sources = PhosphorSources::with_cache_dir(None, tmp.path().to_path_buf()).unwrap();

    assert_eq!(
        sources.remote_url("person", Style::Fill),
        format!("{}/fill/person-fill.svg", REMOTE_BASE_URL)
    );

    let mirrored = sources.with_base_url("http://mirror.local/assets/");
    assert_eq!(
        mirrored.remote_url("person", Style::Regular),
        "http://mirror.local/assets/regular/person.svg"
    );
}

#[tokio::test]
async fn local_checkout_wins() {
    let tmp = tempfile::tempdir().unwrap();
    let checkout = tmp.path().join("core");
    let cache = tmp.path().join("cache");
    let local = checkout.join("assets/bold/person-bold.svg");
    write(&local, "<svg>local</svg>");
    write(&cache.join("bold/person-bold.svg"), "<svg>cached</svg>");

    let mut sources = PhosphorSources::with_cache_dir(Some(checkout), cache).unwrap();
    let resolved = sources.resolve("person", Style::Bold).await.unwrap();

    assert_eq!(resolved, local);
}

#[tokio::test]
async fn missing_checkout_file_falls_back_to_cache() {
    let tmp = tempfile::tempdir().unwrap();
    let checkout = tmp.path().join("core");
    std::fs::create_dir_all(&checkout).unwrap();
    let cache = tmp.path().join("cache");
    let cached = cache.join("regular/user.svg");
    write(&cached, "<svg/>");
    write(&cache.join("thin/user-thin.svg"), "<svg/>");

    let mut sources = PhosphorSources::with_cache_dir(Some(checkout), cache.clone()).unwrap();

    assert_eq!(sources.resolve("user", Style::Regular).await.unwrap(), cached);
    // A second miss must not abort either.
    assert_eq!(
        sources.resolve("user", Style::Thin).await.unwrap(),
        cache.join("thin/user-thin.svg")
    );
}

#[tokio::test]
async fn cache_hit_without_checkout() {
    let tmp = tempfile::tempdir().unwrap();
    let cache = tmp.path().to_path_buf();
    let cached = cache.join("light/gear-light.svg");
    write(&cached, "<svg/>");

    let mut sources = PhosphorSources::with_cache_dir(None, cache.clone()).unwrap();

    assert_eq!(sources.cache_path("gear", Style::Light), cached);
    assert_eq!(sources.resolve("gear", Style::Light).await.unwrap(), cached);
}

#[tokio::test]
async fn download_is_written_to_cache_and_reused() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/assets/fill/person-fill.svg"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<svg>remote</svg>"))
        .expect(1)
        .mount(&server)
        .await;

    let tmp = tempfile::tempdir().unwrap();
    let cache = tmp.path().join("cache");
    let mut sources = PhosphorSources::with_cache_dir(None, cache.clone())
        .unwrap()
        .with_base_url(format!("{}/assets", server.uri()));

    let first = sources.resolve("person", Style::Fill).await.unwrap();
    assert_eq!(first, cache.join("fill/person-fill.svg"));
    assert_eq!(std::fs::read_to_string(&first).unwrap(), "<svg>remote</svg>");

    // Served from the cache; the mock only allows one request.
    let second = sources.resolve("person", Style::Fill).await.unwrap();
    assert_eq!(second, first);
}

#[tokio::test]
async fn missing_remote_icon_is_a_fetch_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let tmp = tempfile::tempdir().unwrap();
    let mut sources = PhosphorSources::with_cache_dir(None, tmp.path().to_path_buf())
        .unwrap()
        .with_base_url(server.uri());

    let err = sources.resolve("nosuchicon", Style::Regular).await.unwrap_err();

    match err.downcast_ref::<Error>() {
        Some(Error::Fetch { url, reason }) => {
            assert_eq!(url, &format!("{}/regular/nosuchicon.svg", server.uri()));
            assert!(reason.contains("404"), "unexpected reason: {}", reason);
        }
        other => panic!("expected fetch error, got {:?}", other),
    }
    assert!(!tmp.path().join("regular/nosuchicon.svg").exists());
}
