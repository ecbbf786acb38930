//! Recursive collection of the images stored under a remote directory

use std::collections::{BTreeMap, VecDeque};

use futures_util::stream::{FuturesUnordered, StreamExt};

use crate::entry::Entry;
use crate::{Client, Error};

/// File extensions considered as images, compared case insensitively
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];
/// Number of directory listings allowed in flight at the same time
pub const DEFAULT_MAX_CONCURRENCY: usize = 8;

/// Image download urls, indexed by their path relative to the walker root
pub type ImageMap = BTreeMap<String, String>;

/// Whether the file name ends with one of the [`IMAGE_EXTENSIONS`]
pub fn is_image(name: &str) -> bool {
    name.rsplit_once('.')
        .map(|(_, ext)| IMAGE_EXTENSIONS.iter().any(|item| ext.eq_ignore_ascii_case(item)))
        .unwrap_or(false)
}

/// Walks a remote directory tree and collects the images it contains.
///
/// Every directory is listed once, with at most `max_concurrency` listings running at the same
/// time. Keys of the resulting [`ImageMap`] are relative to `root`.
#[derive(Debug)]
pub struct Walker<'a> {
    client: &'a Client,
    root: String,
    max_concurrency: usize,
}

impl<'a> Walker<'a> {
    pub fn new(client: &'a Client, root: impl Into<String>) -> Self {
        Self {
            client,
            root: root.into().trim_matches('/').to_string(),
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
        }
    }

    pub fn set_max_concurrency(&mut self, value: usize) {
        self.max_concurrency = value.max(1);
    }

    pub fn with_max_concurrency(mut self, value: usize) -> Self {
        self.set_max_concurrency(value);
        self
    }

    pub fn root(&self) -> &str {
        self.root.as_str()
    }

    /// Path of a remote entry relative to the root, unchanged when outside of the root.
    pub fn relative_key<'p>(&self, path: &'p str) -> &'p str {
        if self.root.is_empty() {
            return path.trim_start_matches('/');
        }
        path.trim_start_matches('/')
            .strip_prefix(self.root.as_str())
            .and_then(|rest| rest.strip_prefix('/'))
            .unwrap_or(path)
    }

    fn collect(&self, entries: Vec<Entry>, images: &mut ImageMap, queue: &mut VecDeque<String>) {
        for entry in entries {
            match entry {
                Entry::Dir(dir) => queue.push_back(dir.path),
                Entry::File(file) if is_image(&file.name) => {
                    if let Some(url) = file.download_url {
                        images.insert(self.relative_key(&file.path).to_string(), url);
                    }
                }
                other => tracing::trace!("ignoring {:?}", other.path()),
            }
        }
    }

    async fn list(&self, path: String) -> (String, Result<Vec<Entry>, Error>) {
        let result = self.client.list_contents(&path).await;
        (path, result)
    }

    /// Collects the images under `path`.
    ///
    /// Fails only when `path` itself cannot be listed. Nested directories that cannot be listed
    /// are logged and contribute no image.
    #[tracing::instrument(skip(self), fields(root = %self.root))]
    pub async fn try_walk(&self, path: &str) -> Result<ImageMap, Error> {
        let mut images = ImageMap::new();
        let mut queue = VecDeque::new();
        let entries = self.client.list_contents(path).await?;
        self.collect(entries, &mut images, &mut queue);

        let mut pending = FuturesUnordered::new();
        loop {
            while pending.len() < self.max_concurrency {
                let Some(dir) = queue.pop_front() else {
                    break;
                };
                pending.push(self.list(dir));
            }
            let Some((dir, result)) = pending.next().await else {
                break;
            };
            match result {
                Ok(entries) => self.collect(entries, &mut images, &mut queue),
                Err(err) => tracing::warn!("unable to list {dir:?}, skipping: {err}"),
            }
        }
        tracing::debug!("found {} images", images.len());
        Ok(images)
    }

    /// Collects the images under `path`, returning an empty map when `path` cannot be listed.
    pub async fn walk(&self, path: &str) -> ImageMap {
        match self.try_walk(path).await {
            Ok(images) => images,
            Err(err) => {
                tracing::warn!("unable to list {path:?}: {err}");
                ImageMap::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{is_image, ImageMap, Walker};
    use crate::tests::client;

    const GALLERY: &str = "/repos/school/portal/contents/src/assets/Gallery";

    #[test]
    fn should_detect_images() {
        assert!(is_image("a.jpg"));
        assert!(is_image("b.JPEG"));
        assert!(is_image("some.file.WebP"));
        assert!(is_image("anim.gif"));
        assert!(!is_image("notes.txt"));
        assert!(!is_image("jpg"));
        assert!(!is_image("archive.png.zip"));
    }

    #[test]
    fn should_build_relative_keys() {
        let client = client("http://localhost".into());
        let walker = Walker::new(&client, "/src/assets/Gallery/");
        assert_eq!(walker.root(), "src/assets/Gallery");
        assert_eq!(walker.relative_key("src/assets/Gallery/A/x.jpg"), "A/x.jpg");
        assert_eq!(walker.relative_key("src/assets/GalleryB/x.jpg"), "src/assets/GalleryB/x.jpg");
        assert_eq!(walker.relative_key("other/x.jpg"), "other/x.jpg");
        let walker = Walker::new(&client, "");
        assert_eq!(walker.relative_key("A/x.jpg"), "A/x.jpg");
    }

    #[tokio::test]
    async fn should_walk_nested_directories() {
        crate::tests::init();
        let mut server = mockito::Server::new_async().await;
        let root = server
            .mock("GET", format!("{GALLERY}/A").as_str())
            .with_status(200)
            .with_body(
                r#"[
    {"type": "dir", "name": "B", "path": "src/assets/Gallery/A/B"},
    {"type": "file", "name": "x.jpg", "path": "src/assets/Gallery/A/x.jpg", "download_url": "u1"}
]"#,
            )
            .create_async()
            .await;
        let nested = server
            .mock("GET", format!("{GALLERY}/A/B").as_str())
            .with_status(200)
            .with_body(
                r#"[
    {"type": "file", "name": "y.png", "path": "src/assets/Gallery/A/B/y.png", "download_url": "u2"}
]"#,
            )
            .create_async()
            .await;
        let client = client(server.url());
        let result = Walker::new(&client, "src/assets/Gallery")
            .walk("src/assets/Gallery/A")
            .await;
        let expected = ImageMap::from([
            ("A/x.jpg".to_string(), "u1".to_string()),
            ("A/B/y.png".to_string(), "u2".to_string()),
        ]);
        assert_eq!(result, expected);
        root.assert_async().await;
        nested.assert_async().await;
    }

    #[tokio::test]
    async fn should_skip_non_images_and_missing_urls() {
        crate::tests::init();
        let mut server = mockito::Server::new_async().await;
        let m = server
            .mock("GET", GALLERY)
            .with_status(200)
            .with_body(
                r#"[
    {"type": "file", "name": "readme.md", "path": "src/assets/Gallery/readme.md", "download_url": "u0"},
    {"type": "file", "name": "lfs.png", "path": "src/assets/Gallery/lfs.png", "download_url": null},
    {"type": "file", "name": "Cover.PNG", "path": "src/assets/Gallery/Cover.PNG", "download_url": "u1"},
    {"type": "symlink", "name": "link.jpg", "path": "src/assets/Gallery/link.jpg", "download_url": "u2"}
]"#,
            )
            .create_async()
            .await;
        let client = client(server.url());
        let result = Walker::new(&client, "src/assets/Gallery")
            .walk("src/assets/Gallery")
            .await;
        assert_eq!(
            result,
            ImageMap::from([("Cover.PNG".to_string(), "u1".to_string())])
        );
        m.assert_async().await;
    }

    #[tokio::test]
    async fn should_ignore_failing_subdirectories() {
        crate::tests::init();
        let mut server = mockito::Server::new_async().await;
        let root = server
            .mock("GET", GALLERY)
            .with_status(200)
            .with_body(
                r#"[
    {"type": "dir", "name": "Broken", "path": "src/assets/Gallery/Broken"},
    {"type": "dir", "name": "Garbage", "path": "src/assets/Gallery/Garbage"},
    {"type": "dir", "name": "Sports", "path": "src/assets/Gallery/Sports"}
]"#,
            )
            .create_async()
            .await;
        let broken = server
            .mock("GET", format!("{GALLERY}/Broken").as_str())
            .with_status(500)
            .with_body(r#"{"message": "Server Error"}"#)
            .create_async()
            .await;
        let garbage = server
            .mock("GET", format!("{GALLERY}/Garbage").as_str())
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;
        let sports = server
            .mock("GET", format!("{GALLERY}/Sports").as_str())
            .with_status(200)
            .with_body(
                r#"[
    {"type": "file", "name": "match.webp", "path": "src/assets/Gallery/Sports/match.webp", "download_url": "u3"}
]"#,
            )
            .create_async()
            .await;
        let client = client(server.url());
        let result = Walker::new(&client, "src/assets/Gallery")
            .with_max_concurrency(1)
            .walk("src/assets/Gallery")
            .await;
        assert_eq!(
            result,
            ImageMap::from([("Sports/match.webp".to_string(), "u3".to_string())])
        );
        root.assert_async().await;
        broken.assert_async().await;
        garbage.assert_async().await;
        sports.assert_async().await;
    }

    #[tokio::test]
    async fn should_report_failing_root() {
        crate::tests::init();
        let mut server = mockito::Server::new_async().await;
        let m = server
            .mock("GET", GALLERY)
            .with_status(404)
            .with_body(r#"{"message": "Not Found"}"#)
            .expect(2)
            .create_async()
            .await;
        let client = client(server.url());
        let walker = Walker::new(&client, "src/assets/Gallery");
        let err = walker.try_walk("src/assets/Gallery").await.unwrap_err();
        assert!(err.is_not_found());
        assert!(walker.walk("src/assets/Gallery").await.is_empty());
        m.assert_async().await;
    }

    #[tokio::test]
    async fn should_collect_wide_trees_with_any_concurrency() {
        crate::tests::init();
        let mut server = mockito::Server::new_async().await;
        let children: Vec<String> = (0..12)
            .map(|idx| {
                format!(r#"{{"type": "dir", "name": "d{idx}", "path": "src/assets/Gallery/d{idx}"}}"#)
            })
            .collect();
        let _root = server
            .mock("GET", GALLERY)
            .with_status(200)
            .with_body(format!("[{}]", children.join(",")))
            .expect(3)
            .create_async()
            .await;
        let mut leaves = Vec::new();
        for idx in 0..12 {
            let body = format!(
                r#"[{{"type": "file", "name": "p.jpg", "path": "src/assets/Gallery/d{idx}/p.jpg", "download_url": "u{idx}"}}]"#
            );
            let leaf = server
                .mock("GET", format!("{GALLERY}/d{idx}").as_str())
                .with_status(200)
                .with_body(body)
                .expect(3)
                .create_async()
                .await;
            leaves.push(leaf);
        }
        let client = client(server.url());
        for concurrency in [0, 3, 64] {
            let result = Walker::new(&client, "src/assets/Gallery")
                .with_max_concurrency(concurrency)
                .walk("src/assets/Gallery")
                .await;
            assert_eq!(result.len(), 12);
            assert_eq!(result.get("d7/p.jpg").map(String::as_str), Some("u7"));
        }
        for leaf in leaves {
            leaf.assert_async().await;
        }
    }
}
