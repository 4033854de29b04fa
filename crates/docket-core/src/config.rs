//! Configuration types for docket.
//!
//! [`Config::load`] layers, lowest precedence first: the embedded defaults, an
//! optional TOML file (explicit path or `~/.config/docket/config.toml`), and
//! environment variables (`DOCKET__SERVER__PORT`, plus bare `PORT`).
//! [`Config::defaults`] returns the embedded defaults without touching the
//! filesystem or the environment (useful in tests).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[server]
host = "0.0.0.0"
port = 6000

[pdf]
chromium_path          = "chromium"
timeout_secs           = 60
max_concurrent         = 2
virtual_time_budget_ms = 10000
extra_args             = []
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub pdf: PdfConfig,
}

/// `[server]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 6000 }

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// `host:port` suitable for `TcpListener::bind`.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// `[pdf]` section: the headless Chromium collaborator.
#[derive(Debug, Clone, Deserialize)]
pub struct PdfConfig {
    /// Executable name or absolute path of the Chromium/Chrome binary.
    #[serde(default = "default_chromium_path")]
    pub chromium_path: String,
    /// Upper bound on a single PDF render; the browser is killed after this.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Browsers allowed to run at once.
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent: usize,
    /// How long the browser may idle on network activity before printing.
    #[serde(default = "default_virtual_time_budget_ms")]
    pub virtual_time_budget_ms: u64,
    /// Appended to the browser command line, e.g. `["--no-sandbox"]` in
    /// containers running as root.
    #[serde(default)]
    pub extra_args: Vec<String>,
}

fn default_chromium_path() -> String { "chromium".to_string() }
fn default_timeout_secs() -> u64 { 60 }
fn default_max_concurrent() -> usize { 2 }
fn default_virtual_time_budget_ms() -> u64 { 10_000 }

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            chromium_path: default_chromium_path(),
            timeout_secs: default_timeout_secs(),
            max_concurrent: default_max_concurrent(),
            virtual_time_budget_ms: default_virtual_time_budget_ms(),
            extra_args: Vec::new(),
        }
    }
}

impl PdfConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load configuration layered on top of the built-in defaults.
    ///
    /// `path` overrides the default location; an explicit path must exist,
    /// the default location is optional.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let (file, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (config_path(), false),
        };

        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(file.as_path()).required(required))
            .add_source(config::Environment::with_prefix("DOCKET").separator("__"));

        // Hosting platforms hand the listen port over as a bare `PORT`.
        if let Ok(port) = std::env::var("PORT") {
            builder = builder.set_override("server.port", port)?;
        }

        let cfg: Config = builder.build()?.try_deserialize()?;
        tracing::debug!(file = %file.display(), "configuration loaded");
        Ok(cfg)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("docket")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
