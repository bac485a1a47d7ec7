// Application state module
// Read-only state built once at startup and shared by every connection

use std::io;
use std::path::PathBuf;

use super::types::Config;
use crate::http::{MimeTable, SuffixMode};

/// Application state
pub struct AppState {
    pub config: Config,
    /// Canonical content root
    pub content_root: PathBuf,
    pub mime: MimeTable,
    pub suffix_mode: SuffixMode,
    pub access_log: bool,
}

impl AppState {
    /// Resolve the content root and assemble the MIME table.
    /// Fails when the root does not exist or is not a directory.
    pub fn new(config: &Config) -> io::Result<Self> {
        let content_root = PathBuf::from(&config.content.root).canonicalize()?;
        if !content_root.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("content root is not a directory: {}", content_root.display()),
            ));
        }

        Ok(Self {
            config: config.clone(),
            content_root,
            mime: MimeTable::with_overrides(&config.mime),
            suffix_mode: config.suffix_mode(),
            access_log: config.logging.access_log,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_state_canonicalizes_root() {
        let dir = TempDir::new().unwrap();
        let mut cfg = Config::default();
        cfg.content.root = dir.path().join(".").to_string_lossy().into_owned();

        let state = AppState::new(&cfg).unwrap();
        assert_eq!(state.content_root, dir.path().canonicalize().unwrap());
        assert_eq!(state.suffix_mode, SuffixMode::Legacy);
    }

    #[test]
    fn test_state_rejects_missing_root() {
        let dir = TempDir::new().unwrap();
        let mut cfg = Config::default();
        cfg.content.root = dir.path().join("nope").to_string_lossy().into_owned();
        assert!(AppState::new(&cfg).is_err());
    }

    #[test]
    fn test_state_rejects_file_root() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("video.mp4");
        std::fs::write(&file, b"x").unwrap();
        let mut cfg = Config::default();
        cfg.content.root = file.to_string_lossy().into_owned();
        assert!(AppState::new(&cfg).is_err());
    }
}
