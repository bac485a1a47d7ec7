//! HTTP protocol layer module
//!
//! Range parsing, chunked streaming, header policy and response builders,
//! decoupled from request routing.

pub mod body;
pub mod cors;
pub mod listing;
pub mod mime;
pub mod range;
pub mod response;
pub mod stream;

// Re-export commonly used types
pub use body::ResponseBody;
pub use mime::MimeTable;
pub use range::{parse_range, ByteRange, RangeError, SuffixMode};
pub use response::{
    build_403_response, build_404_response, build_416_response, build_500_response,
    build_501_response, build_html_response, build_options_response,
};
