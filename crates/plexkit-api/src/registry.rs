//! Named servers and the clients they report.

use std::sync::Arc;

use plexkit_config::{Config, CredentialStore};
use tracing::{debug, info};

use crate::client::Client;
use crate::error::{LibraryError, Result};
use crate::resolve::Selector;
use crate::server::Server;

/// Servers and clients known to the application.
///
/// Built once at startup and passed to whatever needs lookups. Registration
/// order is kept; the first server is the default and the one asked for
/// clients.
#[derive(Debug, Default)]
pub struct Registry {
    servers: Vec<Arc<Server>>,
    clients: Vec<Client>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// HTTP-backed servers for every configured entry, without client discovery.
    pub fn from_config(config: &Config, credentials: Option<&CredentialStore>) -> Result<Self> {
        let mut registry = Self::new();
        for server_config in &config.servers {
            let token = server_config.resolve_token(credentials);
            if token.is_none() {
                debug!("no token configured for server {}", server_config.name);
            }
            registry.register_server(Server::from_config(server_config, token, &config.http)?);
        }
        Ok(registry)
    }

    /// Adds `server`, replacing one with the same name in place.
    pub fn register_server(&mut self, server: Server) -> Arc<Server> {
        let server = Arc::new(server);
        match self.servers.iter_mut().find(|s| s.name() == server.name()) {
            Some(existing) => *existing = Arc::clone(&server),
            None => self.servers.push(Arc::clone(&server)),
        }
        info!("registered server {}", server.name());
        server
    }

    /// Registers `servers` in order, then the clients the first one reports.
    pub fn register_servers<I>(&mut self, servers: I) -> Result<()>
    where
        I: IntoIterator<Item = Server>,
    {
        for server in servers {
            self.register_server(server);
        }
        self.discover_clients()?;
        Ok(())
    }

    /// Replaces the client list with what the default server reports.
    pub fn discover_clients(&mut self) -> Result<usize> {
        let Some(server) = self.servers.first() else {
            return Ok(0);
        };
        self.clients = server.clients()?;
        info!("{} client(s) reported by {}", self.clients.len(), server.name());
        Ok(self.clients.len())
    }

    pub fn register_client(&mut self, client: Client) {
        match self.clients.iter_mut().find(|c| c.name() == client.name()) {
            Some(existing) => *existing = client,
            None => self.clients.push(client),
        }
    }

    pub fn servers(&self) -> &[Arc<Server>] {
        &self.servers
    }

    pub fn clients(&self) -> &[Client] {
        &self.clients
    }

    pub fn server(&self, name: &str) -> Result<&Arc<Server>> {
        self.servers
            .iter()
            .find(|s| s.name() == name)
            .ok_or_else(|| LibraryError::not_found("server", Selector::ByTitle(name.to_string())))
    }

    pub fn default_server(&self) -> Result<&Arc<Server>> {
        self.servers
            .first()
            .ok_or_else(|| LibraryError::EmptyCollection {
                kind: "server".to_string(),
            })
    }

    pub fn client(&self, name: &str) -> Result<&Client> {
        self.clients
            .iter()
            .find(|c| c.name() == name)
            .ok_or_else(|| LibraryError::not_found("client", Selector::ByTitle(name.to_string())))
    }
}
