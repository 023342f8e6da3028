//! Integration tests for the asset worker.
//!
//! These tests drive the public API end to end:
//! - install, activate and version bumps on a shared disk backend
//! - request routing across all four classes
//! - background texture pre-fetch via control messages
//!
//! Run with: `cargo test --test worker_integration`

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use assettier::app::{AppConfig, AssetApp};
use assettier::cache::{BoxFuture, StorageConfig};
use assettier::capability::DeviceSignals;
use assettier::fetch::{AssetRequest, AssetResponse, FetchError, Fetcher};
use assettier::manifest::Manifest;
use assettier::router::{Interception, RequestClass, ResponseSource};
use assettier::worker::WorkerState;

// ============================================================================
// Helpers
// ============================================================================

const ORIGIN: &str = "http://localhost:8080";

/// Origin server stand-in: fixed bodies per URL, everything else 404.
#[derive(Default)]
struct StubOrigin {
    bodies: Mutex<HashMap<String, &'static str>>,
    hits: AtomicUsize,
    offline: AtomicBool,
}

impl StubOrigin {
    fn serving(paths: &[(&str, &'static str)]) -> Arc<Self> {
        let origin = Self::default();
        {
            let mut bodies = origin.bodies.lock().unwrap();
            for (path, body) in paths {
                bodies.insert(format!("{}{}", ORIGIN, path), *body);
            }
        }
        Arc::new(origin)
    }

    fn go_offline(&self) {
        self.offline.store(true, Ordering::SeqCst);
    }

    fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

impl Fetcher for StubOrigin {
    fn fetch<'a>(
        &'a self,
        request: &'a AssetRequest,
    ) -> BoxFuture<'a, Result<AssetResponse, FetchError>> {
        Box::pin(async move {
            self.hits.fetch_add(1, Ordering::SeqCst);
            if self.offline.load(Ordering::SeqCst) {
                return Err(FetchError::Network("connection refused".to_string()));
            }
            let body = self.bodies.lock().unwrap().get(request.cache_key()).copied();
            Ok(match body {
                Some(body) => AssetResponse::ok(body),
                None => AssetResponse::new(404, "no such file"),
            })
        })
    }
}

fn shell() -> Vec<(&'static str, &'static str)> {
    vec![
        ("/", "<html>shell</html>"),
        ("/index.html", "<html>shell</html>"),
        ("/main.css", "body { margin: 0 }"),
        ("/textures/rock.ktx2", "KTX2-rock"),
        ("/textures/sky.webp", "WEBP-sky"),
    ]
}

fn config(storage: StorageConfig, static_version: &str) -> AppConfig {
    AppConfig::default()
        .with_storage(storage)
        .with_manifest(Manifest::new(["/", "/index.html", "/main.css"]))
        .with_static_version(static_version)
        .with_texture_version("tex-v1")
}

fn request(path: &str) -> AssetRequest {
    AssetRequest::parse(&format!("{}{}", ORIGIN, path)).unwrap()
}

// ============================================================================
// Lifecycle
// ============================================================================

/// A static-version bump retires the old shell store but keeps textures.
#[tokio::test]
async fn test_version_bump_keeps_texture_store() {
    let temp = tempfile::TempDir::new().unwrap();
    let origin = StubOrigin::serving(&shell());

    let v1 = AssetApp::start_with_fetcher(
        config(StorageConfig::disk(temp.path()), "app-v1"),
        DeviceSignals::new(8192),
        origin.clone(),
    )
    .await
    .unwrap();

    // Cache a texture through the router
    let answer = v1.worker().handle_fetch(&request("/textures/rock.ktx2")).await;
    assert_eq!(answer.routed().unwrap().source, ResponseSource::Network);

    let storage = v1.storage();
    let mut names = storage.names().await.unwrap();
    names.sort();
    assert_eq!(names, vec!["app-v1", "tex-v1"]);
    drop(v1);

    let v2 = AssetApp::start_with_fetcher(
        config(StorageConfig::disk(temp.path()), "app-v2"),
        DeviceSignals::new(8192),
        origin.clone(),
    )
    .await
    .unwrap();

    let report = v2.start_report().unwrap();
    assert_eq!(report.activation.deleted, vec!["app-v1"]);

    let mut names = v2.storage().names().await.unwrap();
    names.sort();
    assert_eq!(names, vec!["app-v2", "tex-v1"]);

    // Texture survived the bump and is served without the network
    origin.go_offline();
    let answer = v2.worker().handle_fetch(&request("/textures/rock.ktx2")).await;
    let routed = answer.routed().unwrap();
    assert_eq!(routed.source, ResponseSource::Cache);
    assert_eq!(routed.response.body().as_ref(), b"KTX2-rock");
}

/// A manifest entry answering 404 fails install and writes nothing.
#[tokio::test]
async fn test_install_is_all_or_nothing() {
    let origin = StubOrigin::serving(&[("/", "<html>"), ("/index.html", "<html>")]);

    let app = AssetApp::with_fetcher(
        config(StorageConfig::memory(), "app-v1"),
        DeviceSignals::new(8192),
        origin,
    );
    let mut client = app.worker().subscribe();

    assert!(app.worker().start().await.is_err());
    assert!(!client.wait_for_control().await);
    assert_eq!(app.worker().state(), WorkerState::Redundant);
    assert!(app.storage().names().await.unwrap().is_empty());
}

// ============================================================================
// Routing
// ============================================================================

#[tokio::test]
async fn test_routing_offline_after_install() {
    let origin = StubOrigin::serving(&shell());
    let app = AssetApp::start_with_fetcher(
        config(StorageConfig::memory(), "app-v1"),
        DeviceSignals::new(8192),
        origin.clone(),
    )
    .await
    .unwrap();
    origin.go_offline();

    // Installed shell is served from cache
    let routed = app.worker().handle_fetch(&request("/main.css")).await;
    let routed = routed.routed().unwrap();
    assert_eq!(routed.class, RequestClass::Static);
    assert_eq!(routed.source, ResponseSource::Cache);
    assert_eq!(routed.response.status(), 200);

    // Unseen texture: synthesized 404
    let routed = app.worker().handle_fetch(&request("/textures/sky.webp")).await;
    let routed = routed.routed().unwrap();
    assert_eq!(routed.source, ResponseSource::Synthesized);
    assert_eq!(routed.response.body().as_ref(), b"Texture not found");

    // Dynamic request with nothing cached
    let routed = app.worker().handle_fetch(&request("/api/session")).await;
    let routed = routed.routed().unwrap();
    assert_eq!(routed.class, RequestClass::Dynamic);
    assert_eq!(routed.response.status(), 404);
    assert_eq!(routed.response.body().as_ref(), b"Not found");
}

#[tokio::test]
async fn test_static_offline_with_empty_cache_is_404() {
    let origin = StubOrigin::serving(&shell());
    origin.go_offline();

    let app = AssetApp::with_fetcher(
        config(StorageConfig::memory(), "app-v1"),
        DeviceSignals::new(8192),
        origin,
    );

    let routed = app.worker().handle_fetch(&request("/index.html")).await;
    let response = routed.into_response().unwrap();
    assert_eq!(response.status(), 404);
    assert_eq!(response.content_type(), Some("text/plain"));
}

#[tokio::test]
async fn test_texture_fetched_once_then_cached() {
    let origin = StubOrigin::serving(&shell());
    let app = AssetApp::with_fetcher(
        config(StorageConfig::memory(), "app-v1"),
        DeviceSignals::new(8192),
        origin.clone(),
    );

    for _ in 0..3 {
        let response = app
            .worker()
            .handle_fetch(&request("/textures/rock.ktx2"))
            .await
            .into_response()
            .unwrap();
        assert_eq!(response.body().as_ref(), b"KTX2-rock");
    }
    assert_eq!(origin.hits(), 1);

    let textures = app.storage().open("tex-v1").await.unwrap();
    assert_eq!(textures.len().await.unwrap(), 1);
}

#[tokio::test]
async fn test_non_http_requests_pass_through() {
    let origin = StubOrigin::serving(&shell());
    let app = AssetApp::with_fetcher(
        config(StorageConfig::memory(), "app-v1"),
        DeviceSignals::new(8192),
        origin.clone(),
    );

    let request = AssetRequest::parse("blob:http://localhost:8080/1234").unwrap();
    assert_eq!(
        app.worker().handle_fetch(&request).await,
        Interception::PassThrough
    );
    assert_eq!(origin.hits(), 0);
}

// ============================================================================
// Messages
// ============================================================================

#[tokio::test]
async fn test_cache_textures_message() {
    let origin = StubOrigin::serving(&shell());
    let app = AssetApp::with_fetcher(
        config(StorageConfig::memory(), "app-v1"),
        DeviceSignals::new(8192),
        origin.clone(),
    );

    let batch = app
        .worker()
        .handle_raw_message(
            r#"{"type":"CACHE_TEXTURES","textures":["/textures/rock.ktx2","/textures/sky.webp","/textures/missing.ktx2"]}"#,
        )
        .await
        .unwrap();
    let report = batch.join().await;
    assert_eq!(report.stored, 2);
    assert_eq!(report.skipped, 1);

    origin.go_offline();
    let routed = app.worker().handle_fetch(&request("/textures/sky.webp")).await;
    assert_eq!(routed.routed().unwrap().source, ResponseSource::Cache);
}
