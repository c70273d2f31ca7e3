use std::path::PathBuf;

use anyhow::Context;
use serde::Deserialize;

/// Environment variable naming a YAML configuration file.
pub const CONFIG_ENV: &str = "WICKET_CONFIG";

/// Environment variable overriding `server.listen_addr`.
pub const LISTEN_ENV: &str = "LISTEN";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub site: SiteConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
}

/// Read-only settings shared by every connection.
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Directory every request path is resolved against.
    #[serde(default = "default_document_root")]
    pub document_root: PathBuf,
    /// File name of the page whose POST submissions are recorded.
    #[serde(default = "default_form_page")]
    pub form_page: String,
    /// Append-only file receiving recorded submissions.
    #[serde(default = "default_form_log")]
    pub form_log: PathBuf,
    /// Serve `favicon.png` when a client asks for `/favicon.ico`.
    #[serde(default = "default_favicon_fallback")]
    pub favicon_fallback: bool,
}

fn default_listen_addr() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_document_root() -> PathBuf {
    PathBuf::from("source_files")
}

fn default_form_page() -> String {
    "error_page.html".to_string()
}

fn default_form_log() -> PathBuf {
    PathBuf::from("source_files/file.txt")
}

fn default_favicon_fallback() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            document_root: default_document_root(),
            form_page: default_form_page(),
            form_log: default_form_log(),
            favicon_fallback: default_favicon_fallback(),
        }
    }
}

impl Config {
    /// Loads the configuration.
    ///
    /// Reads the YAML file named by `WICKET_CONFIG` when set, otherwise
    /// starts from the defaults. `LISTEN` overrides the listen address in
    /// both cases.
    pub fn load() -> anyhow::Result<Self> {
        let mut cfg = match std::env::var(CONFIG_ENV) {
            Ok(path) => {
                let raw = std::fs::read_to_string(&path)
                    .with_context(|| format!("failed to read config file {}", path))?;
                Self::from_yaml(&raw)
                    .with_context(|| format!("invalid config file {}", path))?
            }
            Err(_) => Self::default(),
        };

        if let Ok(addr) = std::env::var(LISTEN_ENV) {
            cfg.server.listen_addr = addr;
        }

        Ok(cfg)
    }

    pub fn from_yaml(raw: &str) -> anyhow::Result<Self> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(raw)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_yaml_keeps_defaults() {
        let cfg = Config::from_yaml("site:\n  form_page: login.html\n").unwrap();
        assert_eq!(cfg.site.form_page, "login.html");
        assert_eq!(cfg.site.document_root, PathBuf::from("source_files"));
        assert_eq!(cfg.server.listen_addr, "127.0.0.1:8080");
    }
}
