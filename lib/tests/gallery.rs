use gallery::builder::ClientBuilder;
use gallery::cache::{Cache, CacheRecord, DEFAULT_TTL};
use gallery::gallery::{Gallery, CACHE_KEY};
use gallery::storage::{FileStorage, MemoryStorage, Storage};
use gallery::walker::ImageMap;
use std::sync::Arc;

const GALLERY: &str = "/repos/school/portal/contents/src/assets/Gallery";

fn init() {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "gallery=debug".into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

fn client(base_url: String) -> gallery::Client {
    ClientBuilder::default()
        .with_base_url(base_url)
        .with_repository("school", "portal")
        .build()
        .unwrap()
}

async fn mock_gallery(server: &mut mockito::ServerGuard, hits: usize) -> Vec<mockito::Mock> {
    let root = server
        .mock("GET", GALLERY)
        .with_status(200)
        .with_body(
            r#"[
    {"type": "dir", "name": "Sports", "path": "src/assets/Gallery/Sports"},
    {"type": "dir", "name": "Events", "path": "src/assets/Gallery/Events"},
    {"type": "file", "name": "cover.jpg", "path": "src/assets/Gallery/cover.jpg", "download_url": "https://raw/cover.jpg"}
]"#,
        )
        .expect(hits)
        .create_async()
        .await;
    let sports = server
        .mock("GET", format!("{GALLERY}/Sports").as_str())
        .with_status(200)
        .with_body(
            r#"[
    {"type": "file", "name": "relay.jpg", "path": "src/assets/Gallery/Sports/relay.jpg", "download_url": "https://raw/relay.jpg"},
    {"type": "dir", "name": "Football", "path": "src/assets/Gallery/Sports/Football"}
]"#,
        )
        .expect(hits)
        .create_async()
        .await;
    let football = server
        .mock("GET", format!("{GALLERY}/Sports/Football").as_str())
        .with_status(200)
        .with_body(
            r#"[
    {"type": "file", "name": "goal.png", "path": "src/assets/Gallery/Sports/Football/goal.png", "download_url": "https://raw/goal.png"},
    {"type": "file", "name": "match.jpg", "path": "src/assets/Gallery/Sports/Football/match.jpg", "download_url": "https://raw/match.jpg"}
]"#,
        )
        .expect(hits)
        .create_async()
        .await;
    let events = server
        .mock("GET", format!("{GALLERY}/Events").as_str())
        .with_status(200)
        .with_body(
            r#"[
    {"type": "file", "name": "prize-giving.webp", "path": "src/assets/Gallery/Events/prize-giving.webp", "download_url": "https://raw/prize.webp"}
]"#,
        )
        .expect(hits)
        .create_async()
        .await;
    vec![root, sports, football, events]
}

#[tokio::test]
async fn should_serve_gallery_from_cache() {
    init();
    let mut server = mockito::Server::new_async().await;
    let mocks = mock_gallery(&mut server, 1).await;
    let gallery = Gallery::new(client(server.url()), Cache::new(MemoryStorage::default()));

    let images = gallery.images().await;
    assert_eq!(images.len(), 5);
    assert_eq!(
        images.get("Sports/Football/goal.png").map(String::as_str),
        Some("https://raw/goal.png")
    );

    let tree = gallery.folders().await;
    assert_eq!(tree.count, 5);
    assert_eq!(tree.find("Sports").unwrap().count, 3);
    assert_eq!(tree.find("Sports/Football").unwrap().count, 2);
    assert_eq!(tree.find("Events").unwrap().count, 1);

    let options = gallery.folder_options().await;
    let labels: Vec<_> = options.iter().map(|o| o.label.as_str()).collect();
    assert_eq!(
        labels,
        vec!["All Photos (5)", "Events (1)", "Sports (3)", "  Football (2)"]
    );

    let photos = gallery.photos("Sports").await;
    assert_eq!(photos.len(), 3);
    assert!(photos.iter().all(|photo| photo.category == "Sports"));

    for mock in mocks {
        mock.assert_async().await;
    }
}

#[tokio::test]
async fn should_fallback_to_stale_gallery() {
    init();
    let mut server = mockito::Server::new_async().await;
    let m = server
        .mock("GET", GALLERY)
        .with_status(403)
        .with_body(r#"{"message": "API rate limit exceeded"}"#)
        .expect(1)
        .create_async()
        .await;
    let storage = MemoryStorage::default();
    let stale = CacheRecord {
        payload: ImageMap::from([("Old/photo.jpg".to_string(), "https://raw/old.jpg".to_string())]),
        timestamp: chrono::Utc::now().timestamp_millis() - 3 * DEFAULT_TTL.as_millis() as i64,
    };
    storage
        .set(CACHE_KEY, serde_json::to_string(&stale).unwrap())
        .await
        .unwrap();
    let gallery = Gallery::new(client(server.url()), Cache::new(storage));
    assert_eq!(gallery.images().await, stale.payload);
    m.assert_async().await;
}

#[tokio::test]
async fn should_persist_gallery_on_disk() {
    init();
    let dir = temp_dir::TempDir::new().unwrap();
    let mut server = mockito::Server::new_async().await;
    let mocks = mock_gallery(&mut server, 1).await;
    let storage = Arc::new(FileStorage::new(dir.path()));

    let first = Gallery::new(client(server.url()), Cache::new(storage.clone()))
        .with_max_concurrency(2)
        .images()
        .await;
    let second = Gallery::new(client(server.url()), Cache::new(storage.clone()))
        .images()
        .await;
    assert_eq!(first, second);
    assert_eq!(first.len(), 5);

    let raw = storage.get(CACHE_KEY).await.unwrap().unwrap();
    let record: CacheRecord<ImageMap> = serde_json::from_str(&raw).unwrap();
    assert_eq!(record.payload, first);

    for mock in mocks {
        mock.assert_async().await;
    }
}

#[tokio::test]
async fn should_not_cache_anything_when_nothing_is_reachable() {
    init();
    let mut server = mockito::Server::new_async().await;
    let m = server
        .mock("GET", GALLERY)
        .with_status(404)
        .with_body(r#"{"message": "Not Found"}"#)
        .expect(2)
        .create_async()
        .await;
    let gallery = Gallery::new(client(server.url()), Cache::new(MemoryStorage::default()));
    assert!(gallery.images().await.is_empty());
    assert_eq!(gallery.folder_options().await.len(), 1);
    assert!(gallery.cache().storage().get(CACHE_KEY).await.unwrap().is_none());
    m.assert_async().await;
}
