//! Integration tests for precache

use chrono::Utc;
use precache::precache::{CacheKey, CacheNamespace, PrecacheEntry, Scope};
use precache::store::{DiskStore, StoredResponse};
use std::path::Path;

/// Write a response into the on-disk layout the store reads
fn seed_store(cache_dir: &Path, origin: &str, url: &str, revision: Option<&str>, body: &str) -> CacheKey {
    let scope = Scope::new(origin, "/").unwrap();
    let store = DiskStore::open(cache_dir, &CacheNamespace::for_scope(&scope));
    let entry = PrecacheEntry::new(scope.resolve(url).unwrap(), revision.map(str::to_string));
    let key = entry.cache_key();

    std::fs::create_dir_all(store.dir()).unwrap();
    let (meta, body_path) = store.paths_for(&key);
    let stored = StoredResponse {
        key: key.to_string(),
        url: entry.url.to_string(),
        status: 200,
        headers: vec![("content-type".to_string(), "text/plain".to_string())],
        stored_at: Utc::now(),
    };
    std::fs::write(meta, serde_json::to_string(&stored).unwrap()).unwrap();
    std::fs::write(body_path, body).unwrap();
    key
}

mod cli_tests {
    use super::seed_store;
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    struct Workspace {
        dir: TempDir,
    }

    impl Workspace {
        fn new(origin: &str, manifest: Option<&str>) -> Self {
            let dir = TempDir::new().unwrap();
            let mut config = format!(
                "[precache]\norigin = \"{}\"\ncache_dir = \"{}\"\n",
                origin,
                dir.path().join("cache").display()
            );
            if let Some(items) = manifest {
                let path = dir.path().join("manifest.json");
                std::fs::write(&path, items).unwrap();
                config.push_str(&format!("manifest = \"{}\"\n", path.display()));
            }
            std::fs::write(dir.path().join("config.toml"), config).unwrap();
            Self { dir }
        }

        fn config_path(&self) -> PathBuf {
            self.dir.path().join("config.toml")
        }

        fn cache_dir(&self) -> PathBuf {
            self.dir.path().join("cache")
        }

        fn path(&self) -> &Path {
            self.dir.path()
        }

        fn cmd(&self) -> Command {
            let mut cmd = cargo_bin_cmd!("precache");
            cmd.env_remove("PRECACHE_CONFIG")
                .arg("--config")
                .arg(self.config_path());
            cmd
        }
    }

    #[test]
    fn help_displays() {
        cargo_bin_cmd!("precache")
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("Cache-first request handler"));
    }

    #[test]
    fn version_displays() {
        cargo_bin_cmd!("precache")
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("precache"));
    }

    #[test]
    fn key_with_revision() {
        let ws = Workspace::new("https://example.com", None);
        ws.cmd()
            .args(["key", "/url2", "--revision", "abc123"])
            .assert()
            .success()
            .stdout(predicate::str::diff(
                "https://example.com/url2?__WB_REVISION__=abc123\n",
            ));
    }

    #[test]
    fn key_without_revision() {
        let ws = Workspace::new("https://example.com", None);
        ws.cmd()
            .args(["key", "/url1"])
            .assert()
            .success()
            .stdout(predicate::str::diff("https://example.com/url1\n"));
    }

    #[test]
    fn config_path() {
        let ws = Workspace::new("http://localhost", None);
        ws.cmd()
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("config.toml"));
    }

    #[test]
    fn config_show() {
        let ws = Workspace::new("https://example.com", None);
        ws.cmd()
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[precache]"))
            .stdout(predicate::str::contains("https://example.com"));
    }

    #[test]
    fn config_set_persists() {
        let ws = Workspace::new("http://localhost", None);
        ws.cmd()
            .args(["config", "set", "precache.scope", "/app/"])
            .assert()
            .success();

        let saved = std::fs::read_to_string(ws.config_path()).unwrap();
        assert!(saved.contains("scope = \"/app/\""));
    }

    #[test]
    fn config_set_unknown_key() {
        let ws = Workspace::new("http://localhost", None);
        ws.cmd()
            .args(["config", "set", "precache.nope", "1"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Hint:"));
    }

    #[test]
    fn manifest_json() {
        let ws = Workspace::new(
            "https://example.com",
            Some(r#"["/url1", {"url": "/url2", "revision": "abc123"}]"#),
        );
        ws.cmd()
            .args(["manifest", "--format", "json"])
            .assert()
            .success()
            .stdout(predicate::str::contains(
                "\"cacheKey\": \"https://example.com/url2?__WB_REVISION__=abc123\"",
            ))
            .stdout(predicate::str::contains("\"url\": \"https://example.com/url1\""));
    }

    #[test]
    fn manifest_conflict_fails() {
        let ws = Workspace::new(
            "https://example.com",
            Some(r#"[{"url": "/a.js", "revision": "1"}, {"url": "/a.js", "revision": "2"}]"#),
        );
        ws.cmd().args(["manifest"]).assert().failure();
    }

    #[test]
    fn fetch_serves_from_cache() {
        let ws = Workspace::new("http://localhost", Some(r#"[{"url": "/app.js", "revision": "r1"}]"#));
        seed_store(&ws.cache_dir(), "http://localhost", "/app.js", Some("r1"), "cached body");
        let output = ws.path().join("out.js");

        ws.cmd()
            .args(["fetch", "/app.js?utm_source=x", "--no-fallback", "--output"])
            .arg(&output)
            .assert()
            .success()
            .stdout(predicate::str::contains("cache"));

        assert_eq!(std::fs::read_to_string(output).unwrap(), "cached body");
    }

    #[test]
    fn fetch_miss_without_fallback_fails() {
        let ws = Workspace::new("http://localhost", None);
        ws.cmd()
            .args(["fetch", "/cache-miss", "--no-fallback"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("No cached response for http://localhost/cache-miss"))
            .stderr(predicate::str::contains("workbox-precache-v2-http://localhost/"))
            .stderr(predicate::str::contains("Hint:"));
    }

    #[test]
    fn fetch_output_requires_single_url() {
        let ws = Workspace::new("http://localhost", None);
        ws.cmd()
            .args(["fetch", "/a", "/b", "--output", "out"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("single URL"));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn fetch_falls_back_to_network() {
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/url2"))
            .respond_with(ResponseTemplate::new(200).set_body_string("fresh"))
            .expect(1)
            .mount(&server)
            .await;

        let ws = Workspace::new(&server.uri(), Some(r#"[{"url": "/url2", "revision": "abc123"}]"#));
        ws.cmd()
            .args(["fetch", "/url2"])
            .assert()
            .success()
            .stdout(predicate::str::contains("network"));
    }
}

mod handler_tests {
    use super::seed_store;
    use precache::exchange::{FetchEvent, Request};
    use precache::fetch::HttpFetcher;
    use precache::config::schema::NetworkConfig;
    use precache::handler::{HandlerArgs, HandlerOutcome, PrecacheController};
    use precache::precache::{CacheNamespace, PrecacheManifest, Scope};
    use precache::store::DiskStore;
    use precache::PrecacheError;
    use std::sync::Arc;
    use tempfile::TempDir;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn controller(origin: &str, cache_dir: &std::path::Path, items: &[&str]) -> Arc<PrecacheController> {
        let scope = Scope::new(origin, "/").unwrap();
        let items: Vec<precache::precache::ManifestItem> = items
            .iter()
            .map(|item| serde_json::from_str(item).unwrap())
            .collect();
        let manifest = PrecacheManifest::from_items(scope.clone(), items).unwrap();
        let store = DiskStore::open(cache_dir, &CacheNamespace::for_scope(&scope));
        let fetcher = HttpFetcher::new(&NetworkConfig::default());
        Arc::new(PrecacheController::new(
            Arc::new(manifest),
            Arc::new(store),
            Arc::new(fetcher),
        ))
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn empty_precache_without_fallback_reports_details() {
        let server = MockServer::start().await;
        let temp = TempDir::new().unwrap();
        let controller = controller(&server.uri(), temp.path(), &[]);
        let handler = controller.create_handler(false);

        let request = Request::get(format!("{}/cache-miss", server.uri()).parse().unwrap());
        let event = FetchEvent::new();
        let err = handler
            .handle(HandlerArgs { event: &event, request: &request })
            .await
            .unwrap_err();

        assert!(matches!(err, PrecacheError::MissingPrecacheEntry { .. }));
        let details = err.details().unwrap();
        assert_eq!(details.url, format!("{}/cache-miss", server.uri()));
        assert_eq!(
            details.cache_name,
            format!("workbox-precache-v2-{}/", server.uri())
        );
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn hit_skips_network_and_miss_fetches_once() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/url1"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/url2"))
            .respond_with(ResponseTemplate::new(200).set_body_string("from network"))
            .expect(1)
            .mount(&server)
            .await;

        let temp = TempDir::new().unwrap();
        seed_store(temp.path(), &server.uri(), "/url1", None, "from cache");
        let controller = controller(
            &server.uri(),
            temp.path(),
            &[r#""/url1""#, r#"{"url": "/url2", "revision": "abc123"}"#],
        );
        let handler = controller.create_handler(true);
        let event = FetchEvent::new();

        let hit = Request::get(format!("{}/url1", server.uri()).parse().unwrap());
        let outcome = handler
            .handle(HandlerArgs { event: &event, request: &hit })
            .await
            .unwrap();
        assert!(matches!(&outcome, HandlerOutcome::Cached(r) if r.text() == "from cache"));

        let miss = Request::get(
            format!("{}/url2?__WB_REVISION__=abc123", server.uri())
                .parse()
                .unwrap(),
        );
        let outcome = handler
            .handle(HandlerArgs { event: &event, request: &miss })
            .await
            .unwrap();
        assert!(matches!(&outcome, HandlerOutcome::Network(r) if r.text() == "from network"));

        let received = server.received_requests().await.unwrap();
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].url.path(), "/url2");
    }
}
