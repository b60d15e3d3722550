pub mod config;
pub mod credentials;
pub mod paths;

pub use config::{Config, HttpConfig, LoggingConfig, ServerConfig, DEFAULT_PORT};
pub use credentials::CredentialStore;
pub use paths::{container_base_path, PathManager};
