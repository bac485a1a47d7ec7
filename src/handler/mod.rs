//! Request handler module
//!
//! Request dispatch, path resolution, and static file serving.

pub mod error;
pub mod resolver;
pub mod router;
pub mod static_files;

// Re-export main entry point
pub use router::handle_request;
