// Configuration module entry point
// Loads layered configuration and owns the shared application state

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::{Config, HttpConfig, LoggingConfig, PerformanceConfig, ServerConfig, StaticConfig};

impl Config {
    /// Load configuration from the default file path ("config.toml" if present)
    ///
    /// The `PORT` environment variable overrides the configured port on top
    /// of every other source.
    pub fn load() -> Result<Self, config::ConfigError> {
        let mut cfg = Self::load_from("config")?;
        if let Some(port) = port_from_env() {
            cfg.server.port = port;
        }
        Ok(cfg)
    }

    /// Load configuration from the specified file path (without extension)
    ///
    /// Layering, lowest priority first: built-in defaults, optional config
    /// file, `SERVER_*` environment variables.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("SERVER"))
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("http.enable_cors", false)?
            .set_default("http.max_body_size", 10_485_760)? // 10MB
            .build()?;

        settings.try_deserialize()
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

/// Read the listening port from the `PORT` environment variable
fn port_from_env() -> Option<u16> {
    std::env::var("PORT").ok()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = Config::load_from("nonexistent-config").expect("defaults should load");
        assert_eq!(cfg.server.port, 8000);
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.static_files.root, ".");
        assert_eq!(
            cfg.static_files.index_files,
            vec!["index.html".to_string(), "index.htm".to_string()]
        );
        assert!(cfg.logging.access_log);
    }

    #[test]
    fn test_socket_addr() {
        let mut cfg = Config::load_from("nonexistent-config").expect("defaults should load");
        cfg.server.host = "127.0.0.1".to_string();
        cfg.server.port = 8123;
        let addr = cfg.socket_addr().expect("address should parse");
        assert_eq!(addr.to_string(), "127.0.0.1:8123");
    }
}
