//! Logger module
//!
//! Provides logging utilities for the content server including:
//! - Startup banner
//! - Access logging with multiple formats
//! - Transfer progress and client-disconnect notes
//! - Error and warning logging
//! - File-based logging support

mod format;
pub mod writer;

pub use format::AccessLogEntry;

use crate::config::Config;
use std::net::SocketAddr;
use std::path::Path;

/// Sample endpoints printed in the banner
const BANNER_ENDPOINTS: &[(&str, &str)] = &[
    ("Video player", "/players/test-unencrypted.html"),
    ("Unencrypted video", "/content/input.mp4"),
    ("Encrypted video", "/video_encrypted.mp4"),
    ("DASH manifest", "/manifest.mpd"),
];

const BANNER_FEATURES: &[&str] = &[
    "HTTP Range requests for video streaming",
    "CORS headers for cross-origin requests",
    "Proper MIME types for video content",
    "Connection error handling",
    "Concurrent connections (one task per connection)",
];

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
pub fn init(config: &Config) -> std::io::Result<()> {
    writer::init(
        config.logging.access_log_file.as_deref(),
        config.logging.error_log_file.as_deref(),
    )
}

/// Write to info/access log
fn write_info(message: &str) {
    match writer::get() {
        Some(w) => w.write_access(message),
        None => println!("{message}"),
    }
}

/// Write to error log
fn write_error(message: &str) {
    match writer::get() {
        Some(w) => w.write_error(message),
        None => eprintln!("{message}"),
    }
}

pub fn log_server_start(addr: &SocketAddr, content_root: &Path, config: &Config) {
    let port = addr.port();
    write_info("Enhanced Video Content Server");
    write_info(&"=".repeat(50));
    write_info(&format!("Starting server on {addr}"));
    write_info(&format!("Serving content from: {}", content_root.display()));
    write_info(&format!("Access your content at: http://localhost:{port}"));
    if let Some(workers) = config.server.workers {
        write_info(&format!("Worker threads: {workers}"));
    }
    if let Some(ref path) = config.logging.access_log_file {
        write_info(&format!("Access log: {path}"));
    }
    if let Some(ref path) = config.logging.error_log_file {
        write_info(&format!("Error log: {path}"));
    }
    write_info("");
    write_info("Available endpoints:");
    for (label, path) in BANNER_ENDPOINTS {
        write_info(&format!("   {label}: http://localhost:{port}{path}"));
    }
    write_info("");
    write_info("Features:");
    for feature in BANNER_FEATURES {
        write_info(&format!("   - {feature}"));
    }
    write_info("");
    write_info("Press Ctrl+C to stop the server");
    write_info(&"-".repeat(50));
}

pub fn log_shutdown() {
    write_info("\nServer stopped by user");
}

pub fn log_serving_range(start: u64, end: u64, file_size: u64, name: &str) {
    write_info(&format!("Serving range {start}-{end}/{file_size} for {name}"));
}

pub fn log_serving_file(name: &str, file_size: u64) {
    write_info(&format!("Serving {name} ({file_size} bytes)"));
}

/// A client hanging up mid-transfer is routine while seeking; info only
pub fn log_client_disconnected(kind: &str, name: &str, sent: u64) {
    write_info(&format!(
        "Client disconnected during {kind} for {name} after {sent} bytes"
    ));
}

/// Connection-level failure that was not a client hang-up
pub fn log_connection_error(err: &impl std::fmt::Display) {
    write_error(&format!("[WARN] Connection error: {err}"));
}

pub fn log_info(message: &str) {
    write_info(message);
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(&format!("[WARN] {message}"));
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    write_info(&entry.format(format));
}
