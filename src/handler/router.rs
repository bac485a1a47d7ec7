//! Request dispatch module
//!
//! Entry point for HTTP request processing: method dispatch, path
//! resolution, header policy, and access logging.

use super::resolver::{self, Resolution};
use super::static_files;
use crate::config::AppState;
use crate::http::{self, cors, ResponseBody};
use crate::logger::{self, AccessLogEntry};
use hyper::header::{HeaderName, CONTENT_LENGTH, RANGE, REFERER, USER_AGENT};
use hyper::http::request::Parts;
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Request context encapsulating information needed for request processing
pub struct RequestContext<'a> {
    /// Percent-decoded request path
    pub path: &'a str,
    pub is_head: bool,
    pub range_header: Option<&'a str>,
}

/// Main entry point for HTTP request handling.
///
/// Never fails: every outcome, including internal errors, becomes a response.
/// The request body is ignored.
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<ResponseBody>, Infallible> {
    let started = Instant::now();
    let (parts, _) = req.into_parts();
    let method = &parts.method;
    let path = resolver::decode_path(parts.uri.path());
    let range_header = header_str(&parts, RANGE);

    let mut response = match *method {
        Method::OPTIONS => http::build_options_response(),
        Method::GET | Method::HEAD => {
            let ctx = RequestContext {
                path: &path,
                is_head: *method == Method::HEAD,
                range_header,
            };
            serve_path(&ctx, &state).await
        }
        _ => {
            logger::log_warning(&format!("Unsupported method: {method}"));
            http::build_501_response(method.as_str())
        }
    };

    cors::apply_header_policy(response.headers_mut(), &path);

    if state.access_log {
        let entry = access_entry(&parts, &response, peer_addr, started);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Resolve the path and produce a file, listing, or error response
async fn serve_path(ctx: &RequestContext<'_>, state: &AppState) -> Response<ResponseBody> {
    match resolver::resolve(&state.content_root, ctx.path).await {
        Resolution::File(file_path) => static_files::serve_file(ctx, state, &file_path).await,
        Resolution::Listing(dir) => static_files::serve_listing(ctx, &dir).await,
        Resolution::Forbidden => {
            logger::log_warning(&format!("Path traversal attempt blocked: {}", ctx.path));
            http::build_403_response(ctx.is_head)
        }
        Resolution::NotFound => http::build_404_response(
            &format!("File not found: {}", resolver::relative_path(ctx.path)),
            ctx.is_head,
        ),
    }
}

fn header_str(parts: &Parts, name: HeaderName) -> Option<&str> {
    parts.headers.get(name).and_then(|v| v.to_str().ok())
}

/// Access log record for a request; the path is logged as sent, still encoded
fn access_entry(
    req: &Parts,
    response: &Response<ResponseBody>,
    peer_addr: SocketAddr,
    started: Instant,
) -> AccessLogEntry {
    let mut entry = AccessLogEntry::new(
        peer_addr.ip().to_string(),
        req.method.to_string(),
        req.uri.path().to_string(),
    );
    entry.query = req.uri.query().map(ToString::to_string);
    entry.http_version = match req.version {
        hyper::Version::HTTP_10 => "1.0",
        _ => "1.1",
    }
    .to_string();
    entry.status = response.status().as_u16();
    entry.body_bytes = response
        .headers()
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
        .unwrap_or(0);
    entry.range = header_str(req, RANGE).map(ToString::to_string);
    entry.referer = header_str(req, REFERER).map(ToString::to_string);
    entry.user_agent = header_str(req, USER_AGENT).map(ToString::to_string);
    entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
    entry
}
