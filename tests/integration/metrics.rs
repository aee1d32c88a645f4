//! Prometheus exporter integration

use std::net::SocketAddr;
use std::time::Duration;
use tile_fetcher::metrics;
use tokio::time::sleep;

async fn fetch_metrics_text(addr: &str) -> Result<String, Box<dyn std::error::Error>> {
    let url = format!("http://{addr}/metrics");
    let resp = reqwest::get(&url).await?;
    Ok(resp.text().await?)
}

// One test only: the recorder and its listener are process-wide.
#[tokio::test]
async fn test_exporter_serves_tile_counters() {
    let addr: SocketAddr = "127.0.0.1:19190".parse().unwrap();

    assert!(metrics::init_metrics(addr).is_ok());
    assert!(metrics::init_metrics(addr).is_ok());
    assert!(metrics::is_initialized());

    metrics::record_fetch_attempt();
    metrics::record_tile_downloaded(512);
    metrics::record_tile_skipped();
    metrics::record_tile_failed();
    metrics::RunMetrics::start(3).finish(2, 1);

    sleep(Duration::from_millis(200)).await;

    let text = fetch_metrics_text("127.0.0.1:19190").await.unwrap();
    assert!(text.contains("# TYPE"));
    assert!(text.contains("tiles_downloaded_total"));
    assert!(text.contains("tiles_failed_total"));
    assert!(text.contains("tiles_planned"));
}
