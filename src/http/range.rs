//! HTTP Range request parsing module
//!
//! Single-range `bytes=` parsing for media seeking. Only the first range of a
//! multi-range header is honored; multipart responses are never produced.

use thiserror::Error;

/// Validated inclusive byte span, `start <= end < file_size`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    pub start: u64,
    pub end: u64,
}

impl ByteRange {
    /// Number of bytes covered by the range
    #[inline]
    pub const fn content_length(&self) -> u64 {
        self.end - self.start + 1
    }

    /// `Content-Range` header value for this span
    pub fn content_range(&self, file_size: u64) -> String {
        format!("bytes {}-{}/{file_size}", self.start, self.end)
    }
}

/// How a `bytes=-N` header is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SuffixMode {
    /// Missing start means offset 0, so `-N` selects bytes `0..=N`
    #[default]
    Legacy,
    /// RFC 7233: `-N` selects the last N bytes
    Rfc7233,
}

/// Why a Range header was rejected. Every variant maps to 416.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RangeError {
    #[error("{reason}")]
    Malformed { reason: &'static str },

    #[error("Range not satisfiable: {start}-{end}/{size}")]
    Unsatisfiable { start: u64, end: u64, size: u64 },
}

/// Parse a `Range` header against a known file size
///
/// Accepted shapes are `bytes=start-end`, `bytes=start-` and, depending on
/// `mode`, `bytes=-suffix`.
///
/// # Examples
/// ```
/// use content_server::http::range::{parse_range, ByteRange, SuffixMode};
///
/// let range = parse_range("bytes=100-", 1000, SuffixMode::Legacy).unwrap();
/// assert_eq!(range, ByteRange { start: 100, end: 999 });
/// assert_eq!(range.content_length(), 900);
///
/// assert!(parse_range("bytes=1000-", 1000, SuffixMode::Legacy).is_err());
/// ```
pub fn parse_range(
    header: &str,
    file_size: u64,
    mode: SuffixMode,
) -> Result<ByteRange, RangeError> {
    let Some(spec) = header.strip_prefix("bytes=") else {
        return Err(RangeError::Malformed {
            reason: "Invalid range",
        });
    };

    // Only the first range is served
    let first = spec.split(',').next().unwrap_or_default();

    let Some((start_str, end_str)) = first.split_once('-') else {
        return Err(RangeError::Malformed {
            reason: "Invalid range format",
        });
    };
    if end_str.contains('-') {
        return Err(RangeError::Malformed {
            reason: "Invalid range format",
        });
    }

    let (start_str, end_str) = (start_str.trim(), end_str.trim());

    if start_str.is_empty() && mode == SuffixMode::Rfc7233 && !end_str.is_empty() {
        return parse_suffix(end_str, file_size);
    }

    let start = if start_str.is_empty() {
        0
    } else {
        parse_offset(start_str)?
    };

    let end = if end_str.is_empty() {
        match file_size.checked_sub(1) {
            Some(last) => last,
            // Empty file: nothing can be satisfied
            None => {
                return Err(RangeError::Unsatisfiable {
                    start,
                    end: start,
                    size: file_size,
                })
            }
        }
    } else {
        parse_offset(end_str)?
    };

    validate(start, end, file_size)
}

/// RFC 7233 suffix form: the last `suffix` bytes
fn parse_suffix(suffix_str: &str, file_size: u64) -> Result<ByteRange, RangeError> {
    let suffix = parse_offset(suffix_str)?;

    if suffix == 0 || file_size == 0 {
        return Err(RangeError::Unsatisfiable {
            start: file_size.saturating_sub(suffix),
            end: file_size.saturating_sub(1),
            size: file_size,
        });
    }

    // A suffix longer than the file selects the whole file
    Ok(ByteRange {
        start: file_size.saturating_sub(suffix),
        end: file_size - 1,
    })
}

fn parse_offset(token: &str) -> Result<u64, RangeError> {
    token.parse::<u64>().map_err(|_| RangeError::Malformed {
        reason: "Invalid range format",
    })
}

const fn validate(start: u64, end: u64, size: u64) -> Result<ByteRange, RangeError> {
    if start >= size || end >= size || start > end {
        return Err(RangeError::Unsatisfiable { start, end, size });
    }
    Ok(ByteRange { start, end })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn legacy(header: &str, size: u64) -> Result<ByteRange, RangeError> {
        parse_range(header, size, SuffixMode::Legacy)
    }

    #[test]
    fn test_standard_range() {
        let range = legacy("bytes=0-9", 100).unwrap();
        assert_eq!(range, ByteRange { start: 0, end: 9 });
        assert_eq!(range.content_length(), 10);
        assert_eq!(range.content_range(100), "bytes 0-9/100");
    }

    #[test]
    fn test_open_range() {
        let range = legacy("bytes=100-", 1000).unwrap();
        assert_eq!(range, ByteRange { start: 100, end: 999 });
        assert_eq!(range.content_length(), 900);
    }

    #[test]
    fn test_single_byte_at_end() {
        let range = legacy("bytes=999-999", 1000).unwrap();
        assert_eq!(range.content_length(), 1);
    }

    #[test]
    fn test_legacy_suffix_starts_at_zero() {
        // bytes=-100 is not "last 100 bytes" in legacy mode
        let range = legacy("bytes=-100", 1000).unwrap();
        assert_eq!(range, ByteRange { start: 0, end: 100 });
    }

    #[test]
    fn test_legacy_suffix_past_end_is_unsatisfiable() {
        assert_eq!(
            legacy("bytes=-5000", 1000),
            Err(RangeError::Unsatisfiable {
                start: 0,
                end: 5000,
                size: 1000
            })
        );
    }

    #[test]
    fn test_bare_dash_is_whole_file() {
        let range = legacy("bytes=-", 50).unwrap();
        assert_eq!(range, ByteRange { start: 0, end: 49 });
    }

    #[test]
    fn test_rfc_suffix_range() {
        let range = parse_range("bytes=-20", 100, SuffixMode::Rfc7233).unwrap();
        assert_eq!(range, ByteRange { start: 80, end: 99 });

        let whole = parse_range("bytes=-500", 100, SuffixMode::Rfc7233).unwrap();
        assert_eq!(whole, ByteRange { start: 0, end: 99 });

        assert!(matches!(
            parse_range("bytes=-0", 100, SuffixMode::Rfc7233),
            Err(RangeError::Unsatisfiable { .. })
        ));
    }

    #[test]
    fn test_only_first_range_honored() {
        let range = legacy("bytes=0-10,20-30", 100).unwrap();
        assert_eq!(range, ByteRange { start: 0, end: 10 });
    }

    #[test]
    fn test_not_satisfiable() {
        for header in ["bytes=200-", "bytes=100-100", "bytes=0-100", "bytes=50-10"] {
            assert!(
                matches!(legacy(header, 100), Err(RangeError::Unsatisfiable { .. })),
                "{header} should be unsatisfiable"
            );
        }
    }

    #[test]
    fn test_empty_file_is_unsatisfiable() {
        assert!(matches!(
            legacy("bytes=0-", 0),
            Err(RangeError::Unsatisfiable { .. })
        ));
    }

    #[test]
    fn test_malformed() {
        assert_eq!(
            legacy("items=0-9", 100),
            Err(RangeError::Malformed {
                reason: "Invalid range"
            })
        );
        for header in ["bytes=10", "bytes=a-b", "bytes=0-1-2", "bytes=+-"] {
            assert!(
                matches!(legacy(header, 100), Err(RangeError::Malformed { .. })),
                "{header} should be malformed"
            );
        }
    }

    #[test]
    fn test_whitespace_around_tokens() {
        let range = legacy("bytes= 5 - 9 ", 100).unwrap();
        assert_eq!(range, ByteRange { start: 5, end: 9 });
    }
}
