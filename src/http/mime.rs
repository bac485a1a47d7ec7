//! MIME type detection module
//!
//! The table is assembled once at startup (built-in types plus configured
//! overrides) and shared read-only by every request.

use std::collections::HashMap;
use std::path::Path;

/// Fallback for unknown extensions
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Extensions that accept byte-range requests
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "webm", "mkv"];

/// Extensions treated as regenerated-per-run manifests
const MANIFEST_EXTENSIONS: &[&str] = &["mpd"];

const BUILTIN_TYPES: &[(&str, &str)] = &[
    // Streaming
    ("mp4", "video/mp4"),
    ("webm", "video/webm"),
    ("mkv", "video/x-matroska"),
    ("m4s", "video/iso.segment"),
    ("m4v", "video/mp4"),
    ("ts", "video/mp2t"),
    ("mpd", "application/dash+xml"),
    ("m3u8", "application/vnd.apple.mpegurl"),
    ("ogv", "video/ogg"),
    ("mov", "video/quicktime"),
    // Audio
    ("m4a", "audio/mp4"),
    ("mp3", "audio/mpeg"),
    ("wav", "audio/wav"),
    ("flac", "audio/flac"),
    ("ogg", "audio/ogg"),
    // Text
    ("html", "text/html; charset=utf-8"),
    ("htm", "text/html; charset=utf-8"),
    ("css", "text/css"),
    ("txt", "text/plain; charset=utf-8"),
    ("md", "text/plain; charset=utf-8"),
    ("xml", "application/xml"),
    ("vtt", "text/vtt"),
    // Scripts and data
    ("js", "application/javascript"),
    ("mjs", "application/javascript"),
    ("json", "application/json"),
    ("wasm", "application/wasm"),
    // Images
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
    ("svg", "image/svg+xml"),
    ("ico", "image/x-icon"),
    ("webp", "image/webp"),
    // Fonts
    ("woff", "font/woff"),
    ("woff2", "font/woff2"),
    ("ttf", "font/ttf"),
    // Archives and documents
    ("pdf", "application/pdf"),
    ("zip", "application/zip"),
    ("gz", "application/gzip"),
];

/// Immutable extension → Content-Type mapping
#[derive(Debug, Clone)]
pub struct MimeTable {
    types: HashMap<String, String>,
}

impl MimeTable {
    /// Built-in table only
    pub fn new() -> Self {
        Self::with_overrides(&HashMap::new())
    }

    /// Built-in table with configured additions; configured entries win.
    /// Extensions are matched case-insensitively and without the leading dot.
    pub fn with_overrides(overrides: &HashMap<String, String>) -> Self {
        let mut types: HashMap<String, String> = BUILTIN_TYPES
            .iter()
            .map(|(ext, ct)| ((*ext).to_string(), (*ct).to_string()))
            .collect();

        for (ext, content_type) in overrides {
            let ext = ext.trim_start_matches('.').to_ascii_lowercase();
            types.insert(ext, content_type.clone());
        }

        Self { types }
    }

    /// Content-Type for a path, falling back to `application/octet-stream`
    pub fn content_type(&self, path: &Path) -> &str {
        extension_of(path)
            .and_then(|ext| self.types.get(&ext))
            .map_or(DEFAULT_CONTENT_TYPE, String::as_str)
    }
}

impl Default for MimeTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether the path names a seekable video asset
pub fn is_video(path: &str) -> bool {
    has_extension(path, VIDEO_EXTENSIONS)
}

/// Whether the path names a DASH manifest
pub fn is_manifest(path: &str) -> bool {
    has_extension(path, MANIFEST_EXTENSIONS)
}

fn has_extension(path: &str, candidates: &[&str]) -> bool {
    extension_of(Path::new(path)).is_some_and(|ext| candidates.contains(&ext.as_str()))
}

fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
}
