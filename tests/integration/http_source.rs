//! HTTP tile source against a local server

use super::tile_server;
use tile_fetcher::fetcher::{FetcherError, HttpTileSource, TileSource, UrlTemplate};
use tile_fetcher::TileId;

#[tokio::test]
async fn test_fetch_returns_body_on_success() {
    let server = tile_server::spawn();
    let template = UrlTemplate::parse(&server.ok_template()).unwrap();
    let source = HttpTileSource::shared();

    let body = source
        .fetch(&template.render(TileId::new(10, 301, 384)))
        .await
        .unwrap();

    assert_eq!(&body[..], b"/ok/10/301/384.png");
    assert_eq!(server.request_count(), 1);
}

#[tokio::test]
async fn test_fetch_maps_non_success_status() {
    let server = tile_server::spawn();
    let template = UrlTemplate::parse(&server.missing_template()).unwrap();
    let source = HttpTileSource::shared();

    let result = source.fetch(&template.render(TileId::new(3, 1, 2))).await;

    assert!(matches!(
        result,
        Err(FetcherError::HttpStatus { status: 404 })
    ));
}
