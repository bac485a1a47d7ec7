//! Static file serving module
//!
//! Opens resolved files and answers with a whole-file or ranged stream, or
//! renders a directory listing.

use super::error::ServeError;
use super::router::RequestContext;
use crate::config::AppState;
use crate::http::stream::{self, TransferPlan};
use crate::http::{self, body, listing, mime, ResponseBody};
use crate::logger;
use hyper::Response;
use std::path::Path;
use tokio::fs::File;

/// Serve a resolved file, honoring `Range` for video files
pub async fn serve_file(
    ctx: &RequestContext<'_>,
    state: &AppState,
    path: &Path,
) -> Response<ResponseBody> {
    let (file, file_size) = match open_for_streaming(path).await {
        Ok(opened) => opened,
        Err(e) => {
            logger::log_error(&format!("Error serving file {}: {e}", path.display()));
            return http::build_500_response(&e.to_string(), ctx.is_head);
        }
    };

    let content_type = state.mime.content_type(path);
    let name = display_name(path);

    // Ranges apply to video assets only; other files always go out whole
    let range_header = ctx
        .range_header
        .filter(|_| !ctx.is_head && mime::is_video(&path.to_string_lossy()));

    if let Some(header) = range_header {
        return match http::parse_range(header, file_size, state.suffix_mode) {
            Ok(range) => {
                logger::log_serving_range(range.start, range.end, file_size, &name);
                let body = stream::start_transfer(file, TransferPlan::Range(range), name);
                http::response::build_partial_response(content_type, range, file_size, body)
            }
            Err(e) => {
                logger::log_info(&format!("Rejected range '{header}' for {name}: {e}"));
                http::build_416_response(file_size)
            }
        };
    }

    if ctx.is_head {
        return http::response::build_file_response(content_type, file_size, body::empty());
    }

    logger::log_serving_file(&name, file_size);
    let body = stream::start_transfer(file, TransferPlan::Whole { file_size }, name);
    http::response::build_file_response(content_type, file_size, body)
}

/// Render a listing for a directory that has no index file
pub async fn serve_listing(ctx: &RequestContext<'_>, dir: &Path) -> Response<ResponseBody> {
    match listing::read_entries(dir).await {
        Ok(entries) => http::build_html_response(listing::render(ctx.path, &entries), ctx.is_head),
        Err(e) => {
            logger::log_warning(&format!("Cannot list {}: {e}", dir.display()));
            http::build_404_response("No permission to list directory", ctx.is_head)
        }
    }
}

/// Open a file and read its size; the file may have changed since resolution
async fn open_for_streaming(path: &Path) -> Result<(File, u64), ServeError> {
    let file = File::open(path).await?;
    let meta = file.metadata().await?;
    if !meta.is_file() {
        return Err(ServeError::NotAFile {
            path: path.to_path_buf(),
        });
    }
    Ok((file, meta.len()))
}

fn display_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |n| n.to_string_lossy().into_owned(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use http_body_util::BodyExt;
    use hyper::StatusCode;
    use tempfile::TempDir;

    fn state_for(dir: &TempDir) -> AppState {
        let mut cfg = Config::default();
        cfg.content.root = dir.path().to_string_lossy().into_owned();
        cfg.logging.access_log = false;
        AppState::new(&cfg).unwrap()
    }

    fn ctx<'a>(path: &'a str, range: Option<&'a str>, is_head: bool) -> RequestContext<'a> {
        RequestContext {
            path,
            is_head,
            range_header: range,
        }
    }

    async fn body_bytes(response: Response<ResponseBody>) -> Vec<u8> {
        response.into_body().collect().await.unwrap().to_bytes().to_vec()
    }

    #[tokio::test]
    async fn test_video_range_is_partial() {
        let dir = TempDir::new().unwrap();
        let data: Vec<u8> = (0..2_000u32).map(|i| (i % 256) as u8).collect();
        let file = dir.path().join("clip.mp4");
        std::fs::write(&file, &data).unwrap();
        let state = state_for(&dir);

        let request = ctx("/clip.mp4", Some("bytes=100-199"), false);
        let response = serve_file(&request, &state, &file).await;
        assert_eq!(response.status(), StatusCode::PARTIAL_CONTENT);
        assert_eq!(response.headers()["Content-Range"], "bytes 100-199/2000");
        assert_eq!(response.headers()["Content-Type"], "video/mp4");
        assert_eq!(body_bytes(response).await, &data[100..200]);
    }

    #[tokio::test]
    async fn test_range_ignored_for_non_video() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("manifest.mpd");
        std::fs::write(&file, b"<MPD/>").unwrap();
        let state = state_for(&dir);

        let request = ctx("/manifest.mpd", Some("bytes=0-1"), false);
        let response = serve_file(&request, &state, &file).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["Content-Type"], "application/dash+xml");
        assert_eq!(body_bytes(response).await, b"<MPD/>");
    }

    #[tokio::test]
    async fn test_unsatisfiable_range() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("clip.webm");
        std::fs::write(&file, vec![0u8; 100]).unwrap();
        let state = state_for(&dir);

        let request = ctx("/clip.webm", Some("bytes=100-"), false);
        let response = serve_file(&request, &state, &file).await;
        assert_eq!(response.status(), StatusCode::RANGE_NOT_SATISFIABLE);
        assert!(body_bytes(response).await.is_empty());
    }

    #[tokio::test]
    async fn test_head_has_length_but_no_body() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("clip.mp4");
        std::fs::write(&file, vec![7u8; 321]).unwrap();
        let state = state_for(&dir);

        let response = serve_file(&ctx("/clip.mp4", Some("bytes=0-9"), true), &state, &file).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["Content-Length"], "321");
        assert!(body_bytes(response).await.is_empty());
    }

    #[tokio::test]
    async fn test_vanished_file_is_500() {
        let dir = TempDir::new().unwrap();
        let state = state_for(&dir);
        let missing = dir.path().join("gone.mp4");

        let response = serve_file(&ctx("/gone.mp4", None, false), &state, &missing).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let text = String::from_utf8(body_bytes(response).await).unwrap();
        assert!(text.starts_with("500 Internal server error: "));
    }

    #[tokio::test]
    async fn test_listing_renders_entries() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("a.mp4"), b"x").unwrap();

        let response = serve_listing(&ctx("/", None, false), dir.path()).await;
        assert_eq!(response.status(), StatusCode::OK);
        let html = String::from_utf8(body_bytes(response).await).unwrap();
        assert!(html.contains(r#"<a href="/a.mp4">a.mp4</a>"#));
    }
}
