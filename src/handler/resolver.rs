//! URL path → filesystem path resolution beneath the content root

use percent_encoding::percent_decode_str;
use std::path::{Path, PathBuf};
use tokio::fs;

/// File served for the root and for directories that have one
pub const INDEX_FILE: &str = "index.html";

/// Outcome of resolving a request path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Regular file to stream
    File(PathBuf),
    /// Directory without an index file
    Listing(PathBuf),
    /// Parent-directory traversal attempt
    Forbidden,
    NotFound,
}

/// Percent-decode a raw URL path; invalid UTF-8 is replaced, not rejected
pub fn decode_path(raw: &str) -> String {
    percent_decode_str(raw).decode_utf8_lossy().into_owned()
}

/// Path relative to the content root, `index.html` for the root itself
pub fn relative_path(decoded: &str) -> &str {
    let relative = decoded.trim_start_matches('/');
    if relative.is_empty() {
        INDEX_FILE
    } else {
        relative
    }
}

/// Resolve a decoded URL path against `root`.
///
/// Any `..` is refused before the filesystem is consulted.
pub async fn resolve(root: &Path, decoded: &str) -> Resolution {
    if decoded.contains("..") {
        return Resolution::Forbidden;
    }

    let full_path = root.join(relative_path(decoded));

    match fs::metadata(&full_path).await {
        Ok(meta) if meta.is_file() => Resolution::File(full_path),
        Ok(meta) if meta.is_dir() => {
            let index = full_path.join(INDEX_FILE);
            if fs::metadata(&index).await.is_ok_and(|m| m.is_file()) {
                Resolution::File(index)
            } else {
                Resolution::Listing(full_path)
            }
        }
        _ => Resolution::NotFound,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn content_root() -> TempDir {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("index.html"), b"<h1>root</h1>").unwrap();
        std::fs::create_dir_all(dir.path().join("players")).unwrap();
        std::fs::write(dir.path().join("players/index.html"), b"player").unwrap();
        std::fs::create_dir_all(dir.path().join("content")).unwrap();
        std::fs::write(dir.path().join("content/input.mp4"), b"mp4").unwrap();
        std::fs::write(dir.path().join("content/my clip.mp4"), b"mp4").unwrap();
        dir
    }

    #[test]
    fn test_decode_path() {
        assert_eq!(decode_path("/content/my%20clip.mp4"), "/content/my clip.mp4");
        assert_eq!(decode_path("/%2e%2e/etc"), "/../etc");
        assert_eq!(decode_path("/bad%ff"), "/bad\u{fffd}");
    }

    #[test]
    fn test_relative_path() {
        assert_eq!(relative_path(""), "index.html");
        assert_eq!(relative_path("/"), "index.html");
        assert_eq!(relative_path("//a.mp4"), "a.mp4");
    }

    #[tokio::test]
    async fn test_root_serves_index() {
        let dir = content_root();
        assert_eq!(
            resolve(dir.path(), "/").await,
            Resolution::File(dir.path().join("index.html"))
        );
        assert_eq!(
            resolve(dir.path(), "").await,
            Resolution::File(dir.path().join("index.html"))
        );
    }

    #[tokio::test]
    async fn test_directory_prefers_index() {
        let dir = content_root();
        assert_eq!(
            resolve(dir.path(), "/players").await,
            Resolution::File(dir.path().join("players").join("index.html"))
        );
    }

    #[tokio::test]
    async fn test_directory_without_index_lists() {
        let dir = content_root();
        assert_eq!(
            resolve(dir.path(), "/content/").await,
            Resolution::Listing(dir.path().join("content/"))
        );
    }

    #[tokio::test]
    async fn test_file_and_decoded_names() {
        let dir = content_root();
        assert_eq!(
            resolve(dir.path(), "/content/input.mp4").await,
            Resolution::File(dir.path().join("content/input.mp4"))
        );
        let decoded = decode_path("/content/my%20clip.mp4");
        assert_eq!(
            resolve(dir.path(), &decoded).await,
            Resolution::File(dir.path().join("content/my clip.mp4"))
        );
    }

    #[tokio::test]
    async fn test_traversal_forbidden_without_touching_disk() {
        // The root does not exist; a filesystem lookup would yield NotFound
        let root = Path::new("/definitely/not/a/real/root");
        for path in ["/../etc/passwd", "/content/../../secret", "/a/..", "/..%2f"] {
            assert_eq!(resolve(root, path).await, Resolution::Forbidden, "{path}");
        }
        assert_eq!(
            resolve(root, &decode_path("/%2e%2e/etc/passwd")).await,
            Resolution::Forbidden
        );
    }

    #[tokio::test]
    async fn test_missing_is_not_found() {
        let dir = content_root();
        assert_eq!(resolve(dir.path(), "/nope.mp4").await, Resolution::NotFound);
    }

    #[tokio::test]
    async fn test_root_without_index_is_not_found() {
        let dir = TempDir::new().unwrap();
        assert_eq!(resolve(dir.path(), "/").await, Resolution::NotFound);
    }
}
