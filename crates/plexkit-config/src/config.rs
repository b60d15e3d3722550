use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;

use crate::credentials::CredentialStore;

pub const DEFAULT_PORT: u16 = 32400;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Ordered; the first server is the one asked for its clients.
    #[serde(default)]
    pub servers: Vec<ServerConfig>,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub name: String,
    pub address: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Falls back to `token.<name>` in the credential store when unset.
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default = "default_scheme")]
    pub scheme: String,
}

impl ServerConfig {
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            port: DEFAULT_PORT,
            token: None,
            scheme: default_scheme(),
        }
    }

    /// Inline token first, then the credential store.
    pub fn resolve_token(&self, credentials: Option<&CredentialStore>) -> Option<String> {
        self.token
            .clone()
            .or_else(|| credentials.and_then(|c| c.get_server_token(&self.name).cloned()))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    #[serde(default = "default_client_identifier")]
    pub client_identifier: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout_seconds(),
            client_identifier: default_client_identifier(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_json_logging")]
    pub json: bool,
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: default_json_logging(),
            file: None,
        }
    }
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_scheme() -> String {
    "http".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_client_identifier() -> String {
    "plexkit".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_json_logging() -> bool {
    use std::io::IsTerminal;
    !std::io::stdout().is_terminal()
}

impl Config {
    pub fn load_from_file(path: &PathBuf) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: &PathBuf) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let mut names = HashSet::new();
        for server in &self.servers {
            if server.name.trim().is_empty() {
                return Err(anyhow::anyhow!("Server name cannot be empty"));
            }
            if !names.insert(server.name.as_str()) {
                return Err(anyhow::anyhow!("Duplicate server name: {}", server.name));
            }
            if server.address.trim().is_empty() {
                return Err(anyhow::anyhow!("Server '{}' has no address", server.name));
            }
            if server.port == 0 {
                return Err(anyhow::anyhow!("Server '{}' has an invalid port", server.name));
            }
            if server.scheme != "http" && server.scheme != "https" {
                return Err(anyhow::anyhow!(
                    "Server '{}' has unsupported scheme: {}",
                    server.name,
                    server.scheme
                ));
            }
        }

        if self.http.timeout_seconds == 0 {
            return Err(anyhow::anyhow!("http.timeout_seconds must be positive"));
        }

        Ok(())
    }

    pub fn server(&self, name: &str) -> Option<&ServerConfig> {
        self.servers.iter().find(|s| s.name == name)
    }

    /// Adds `server`, replacing an entry with the same name in place.
    pub fn upsert_server(&mut self, server: ServerConfig) {
        match self.servers.iter_mut().find(|s| s.name == server.name) {
            Some(existing) => *existing = server,
            None => self.servers.push(server),
        }
    }
}
