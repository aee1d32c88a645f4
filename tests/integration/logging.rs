//! Integration tests for logging and tracing

use async_trait::async_trait;
use bytes::Bytes;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use tile_fetcher::downloader::TileDispatcher;
use tile_fetcher::fetcher::{FetcherError, FetcherResult, TileFetcher, TileSource, UrlTemplate};
use tile_fetcher::TileId;
use tracing::subscriber::DefaultGuard;
use tracing_subscriber::EnvFilter;

/// Log sink shared between the subscriber and the test
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn capture_text() -> (CapturedLogs, DefaultGuard) {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("tile_fetcher=debug"))
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    (logs, tracing::subscriber::set_default(subscriber))
}

fn capture_json() -> (CapturedLogs, DefaultGuard) {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .json()
        .with_env_filter(EnvFilter::new("tile_fetcher=info"))
        .with_writer(move || writer.clone())
        .finish();
    (logs, tracing::subscriber::set_default(subscriber))
}

struct UnavailableSource;

#[async_trait]
impl TileSource for UnavailableSource {
    async fn fetch(&self, _url: &str) -> FetcherResult<Bytes> {
        Err(FetcherError::HttpStatus { status: 503 })
    }
}

fn failing_fetcher(dir: &TempDir) -> TileFetcher {
    TileFetcher::new(
        Arc::new(UnavailableSource),
        UrlTemplate::parse("https://tiles.test/{z}/{x}/{y}.png").unwrap(),
        dir.path(),
        2,
    )
}

#[tokio::test]
async fn test_attempt_warnings_carry_tile_fields() {
    let (logs, _guard) = capture_text();
    let dir = TempDir::new().unwrap();

    assert!(!failing_fetcher(&dir).fetch_tile(TileId::new(10, 301, 384)).await);

    let output = logs.contents();
    let warnings: Vec<&str> = output.lines().filter(|l| l.contains("WARN")).collect();
    assert_eq!(warnings.len(), 2, "{output}");
    assert!(warnings[0].contains("tile=10/301/384"));
    assert!(warnings[0].contains("attempt=1"));
    assert!(warnings[0].contains("max_attempts=2"));
    assert!(warnings[0].contains("service unavailable"));
    assert!(warnings[0].contains("retrying"));
    assert!(warnings[1].contains("attempt=2"));
    assert!(!warnings[1].contains("retrying"));
}

#[tokio::test]
async fn test_json_warning_fields() {
    let (logs, _guard) = capture_json();
    let dir = TempDir::new().unwrap();

    failing_fetcher(&dir).fetch_tile(TileId::new(10, 301, 384)).await;

    let output = logs.contents();
    let first: serde_json::Value = serde_json::from_str(output.lines().next().unwrap()).unwrap();
    assert_eq!(first["level"], "WARN");
    assert_eq!(first["fields"]["tile"], "10/301/384");
    assert_eq!(first["fields"]["attempt"], 1);
    assert_eq!(first["fields"]["url"], "https://tiles.test/10/301/384.png");
}

#[tokio::test]
async fn test_dispatcher_reports_empty_plan_and_failures() {
    let (logs, _guard) = capture_text();

    TileDispatcher::new(2).run(Vec::new(), |_| async { true }).await;
    TileDispatcher::new(2)
        .run(vec![TileId::new(3, 1, 2)], |_| async { false })
        .await;

    let output = logs.contents();
    assert!(output.contains("No tiles to download; check your bounds or zoom levels."));
    assert!(output.contains("Tile 3/1/2 failed after retries"));
    assert!(output.contains("Progress: 1/1 (100.0%)"));
}

#[test]
fn test_env_filter_hides_debug_at_info() {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("tile_fetcher=info"))
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        tile_fetcher::downloader::plan(
            &tile_fetcher::BoundingBox::new(40.70, -74.02, 40.72, -74.00),
            10,
            10,
        );
    });

    // the planner only logs at debug
    assert!(logs.contents().is_empty());
}

#[test]
fn test_json_logs_from_binary() {
    use assert_cmd::Command;

    let temp_dir = TempDir::new().unwrap();
    let out = temp_dir.path().join("tiles");

    let output = Command::cargo_bin("tile-fetcher")
        .unwrap()
        .env("LOG_FORMAT", "json")
        .env_remove("RUST_LOG")
        .args([
            "--min-lat",
            "0",
            "--min-lon",
            "0",
            "--max-lat",
            "1",
            "--max-lon",
            "1",
            "--min-zoom",
            "4",
            "--max-zoom",
            "2",
            "--url-template",
            "http://127.0.0.1:9/{z}/{x}/{y}.png",
            "--out-dir",
            out.to_str().unwrap(),
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stderr = String::from_utf8(output.stderr).unwrap();
    let lines: Vec<serde_json::Value> = stderr
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert!(!lines.is_empty());
    assert!(lines.iter().any(|l| l["fields"]["message"]
        .as_str()
        .is_some_and(|m| m.contains("No tiles to download"))));
}
