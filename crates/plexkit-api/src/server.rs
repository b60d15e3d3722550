use std::fmt;
use std::sync::Arc;

use plexkit_config::{HttpConfig, ServerConfig, DEFAULT_PORT};
use plexkit_models::RawRecord;
use tracing::debug;

use crate::client::Client;
use crate::endpoint::{self, CLIENTS};
use crate::error::Result;
use crate::library::Library;
use crate::transport::{DecodedBody, HttpCaller, HttpOptions, NetworkCaller};

/// Connection details every entity carries.
pub trait ServerContext {
    /// `scheme://address:port`, no trailing separator.
    fn base_url(&self) -> String;
    fn auth_token(&self) -> Option<&str>;
}

/// A media server and the caller used to reach it.
///
/// Set once at construction and shared read-only by every entity fetched
/// through it.
#[derive(Clone)]
pub struct Server {
    name: String,
    address: String,
    port: u16,
    scheme: String,
    token: Option<String>,
    caller: Arc<dyn NetworkCaller>,
}

impl Server {
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        port: Option<u16>,
        caller: Arc<dyn NetworkCaller>,
    ) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            port: port.unwrap_or(DEFAULT_PORT),
            scheme: "http".to_string(),
            token: None,
            caller,
        }
    }

    /// Builds a server reached through [`HttpCaller`].
    pub fn from_config(config: &ServerConfig, token: Option<String>, http: &HttpConfig) -> Result<Self> {
        let options = HttpOptions {
            timeout: Some(std::time::Duration::from_secs(http.timeout_seconds)),
            client_identifier: http.client_identifier.clone(),
        };
        let caller = HttpCaller::new(token.as_deref(), &options)?;
        Ok(Self::new(config.name.clone(), config.address.clone(), Some(config.port), Arc::new(caller))
            .with_scheme(config.scheme.clone())
            .with_token(token))
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = scheme.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// One round trip to an absolute URL.
    pub fn call(&self, url: &str) -> Result<DecodedBody> {
        debug!(server = %self.name, "calling {}", url);
        Ok(self.caller.call(url)?)
    }

    /// Records behind `library/{endpoint}`, verbatim.
    pub fn library_records(&self, endpoint: &str) -> Result<Vec<RawRecord>> {
        let url = endpoint::library_url(&self.base_url(), endpoint);
        let records = self.call(&url)?.into_records();
        debug!("{} record(s) from {}", records.len(), endpoint);
        Ok(records)
    }

    pub fn library(self: &Arc<Self>) -> Library {
        Library::new(Arc::clone(self))
    }

    /// Players currently reported by the server.
    pub fn clients(self: &Arc<Self>) -> Result<Vec<Client>> {
        let url = format!("{}/{}", self.base_url(), CLIENTS);
        self.call(&url)?
            .into_records()
            .iter()
            .map(|record| Client::from_record(Arc::clone(self), record))
            .collect()
    }
}

impl ServerContext for Server {
    fn base_url(&self) -> String {
        format!("{}://{}:{}", self.scheme, self.address, self.port)
    }

    fn auth_token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}

impl fmt::Debug for Server {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Server")
            .field("name", &self.name)
            .field("address", &self.address)
            .field("port", &self.port)
            .field("scheme", &self.scheme)
            .field("token", &self.token.as_ref().map(|_| "***"))
            .finish()
    }
}
