//! Cross-origin and cache header policy
//!
//! Applied to every response on its way out, whatever its status, so browser
//! players on another origin can read range metadata.

use super::mime;
use hyper::header::{HeaderMap, HeaderName, HeaderValue};

const CORS_HEADERS: &[(&str, &str)] = &[
    ("access-control-allow-origin", "*"),
    ("access-control-allow-methods", "GET, POST, OPTIONS"),
    (
        "access-control-allow-headers",
        "Content-Type, Authorization, Range",
    ),
    (
        "access-control-expose-headers",
        "Content-Range, Content-Length, Accept-Ranges",
    ),
];

const VIDEO_HEADERS: &[(&str, &str)] = &[
    ("accept-ranges", "bytes"),
    ("cache-control", "no-cache"),
];

const MANIFEST_HEADERS: &[(&str, &str)] = &[
    ("cache-control", "no-cache, no-store, must-revalidate"),
    ("pragma", "no-cache"),
    ("expires", "0"),
];

/// Add CORS headers plus the cache policy selected by the request path
pub fn apply_header_policy(headers: &mut HeaderMap, path: &str) {
    insert_all(headers, CORS_HEADERS);

    if mime::is_video(path) {
        insert_all(headers, VIDEO_HEADERS);
    } else if mime::is_manifest(path) {
        insert_all(headers, MANIFEST_HEADERS);
    }
}

fn insert_all(headers: &mut HeaderMap, pairs: &[(&'static str, &'static str)]) {
    for &(name, value) in pairs {
        headers.insert(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        );
    }
}
