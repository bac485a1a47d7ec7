//! Static content server for video pipelines.
//!
//! Serves files from a content root over HTTP/1.1 with byte-range streaming,
//! permissive CORS, and tolerance for clients that hang up mid-transfer.

pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;
