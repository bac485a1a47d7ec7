// Configuration module entry point
// Loads layered configuration and builds the read-only runtime state

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::{Config, ContentConfig, HttpConfig, LoggingConfig, ServerConfig};

use crate::http::SuffixMode;

/// Config file used when `CONTENT_SERVER_CONFIG` is not set (extension optional)
pub const DEFAULT_CONFIG_PATH: &str = "content-server";

/// Environment prefix, e.g. `CONTENT_SERVER__SERVER__PORT=9000`
const ENV_PREFIX: &str = "CONTENT_SERVER";

impl Config {
    /// Load from the file named by `CONTENT_SERVER_CONFIG`, or the default path
    pub fn load() -> Result<Self, config::ConfigError> {
        let path = std::env::var("CONTENT_SERVER_CONFIG")
            .unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_from(&path)
    }

    /// Load configuration from specified file path (extension optional).
    /// A missing file is not an error; built-in defaults apply.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }

    pub const fn suffix_mode(&self) -> SuffixMode {
        if self.http.rfc_suffix_ranges {
            SuffixMode::Rfc7233
        } else {
            SuffixMode::Legacy
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_without_file() {
        let dir = TempDir::new().unwrap();
        let cfg = Config::load_from(dir.path().join("absent").to_str().unwrap()).unwrap();
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.content.root, ".");
        assert!(cfg.logging.access_log);
        assert_eq!(cfg.suffix_mode(), SuffixMode::Legacy);
        assert!(cfg.mime.is_empty());
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("server.toml");
        std::fs::write(
            &path,
            r#"
[server]
host = "127.0.0.1"
port = 9090

[content]
root = "/srv/media"

[http]
rfc_suffix_ranges = true

[mime]
m4s = "video/iso.segment"
"#,
        )
        .unwrap();

        let cfg = Config::load_from(path.to_str().unwrap()).unwrap();
        assert_eq!(cfg.server.port, 9090);
        assert_eq!(cfg.content.root, "/srv/media");
        assert_eq!(cfg.suffix_mode(), SuffixMode::Rfc7233);
        assert_eq!(cfg.mime.get("m4s").map(String::as_str), Some("video/iso.segment"));
        // Untouched sections keep their defaults
        assert_eq!(cfg.logging.access_log_format, "combined");
        assert_eq!(
            cfg.get_socket_addr().unwrap(),
            "127.0.0.1:9090".parse().unwrap()
        );
    }

    #[test]
    fn test_invalid_address() {
        let mut cfg = Config::default();
        cfg.server.host = "not a host".to_string();
        assert!(cfg.get_socket_addr().is_err());
    }
}
