//! Remote control of players attached to a server.
//!
//! Commands are relayed through the server: one GET per command to
//! `{server}/system/players/{clientAddress}/{controller}/{command}`.

mod command;

use std::sync::Arc;

use plexkit_models::record::{int_field, string_field};
use plexkit_models::RawRecord;
use serde::Serialize;
use tracing::info;

use crate::endpoint;
use crate::error::{LibraryError, Result};
use crate::resolve::Entity;
use crate::server::{Server, ServerContext};

pub use command::{NavigationCommand, PlaybackCommand};

pub const DEFAULT_CLIENT_PORT: u16 = 3000;

const NAVIGATION: &str = "navigation";
const PLAYBACK: &str = "playback";
const APPLICATION: &str = "application";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    #[serde(skip)]
    server: Arc<Server>,
    name: String,
    address: String,
    port: u16,
    host: Option<String>,
    machine_identifier: Option<String>,
    version: Option<String>,
}

impl Client {
    pub fn new(server: Arc<Server>, name: impl Into<String>, address: impl Into<String>, port: Option<u16>) -> Self {
        Self {
            server,
            name: name.into(),
            address: address.into(),
            port: port.unwrap_or(DEFAULT_CLIENT_PORT),
            host: None,
            machine_identifier: None,
            version: None,
        }
    }

    /// Client as listed by the server's `clients` endpoint.
    pub fn from_record(server: Arc<Server>, record: &RawRecord) -> Result<Self> {
        let name = string_field(record, "name")?.unwrap_or_default();
        let host = string_field(record, "host")?;
        let address = string_field(record, "address")?
            .or_else(|| host.clone())
            .unwrap_or_default();
        let port = match int_field(record, "port")? {
            None => None,
            Some(port) => Some(u16::try_from(port).map_err(|_| LibraryError::MalformedAttribute {
                field: "port".to_string(),
                value: port.to_string(),
            })?),
        };

        let mut client = Self::new(server, name, address, port);
        client.host = host;
        client.machine_identifier = string_field(record, "machineIdentifier")?;
        client.version = string_field(record, "version")?;
        Ok(client)
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

    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    pub fn machine_identifier(&self) -> Option<&str> {
        self.machine_identifier.as_deref()
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn server(&self) -> &Arc<Server> {
        &self.server
    }

    pub fn navigation(&self) -> Navigation<'_> {
        Navigation { client: self }
    }

    pub fn playback(&self) -> Playback<'_> {
        Playback { client: self }
    }

    pub fn application(&self) -> Application<'_> {
        Application { client: self }
    }

    pub fn command_url(&self, controller: &str, command: &str, params: &[(&str, String)]) -> String {
        endpoint::player_url(&self.server.base_url(), &self.address, controller, command, params)
    }

    fn execute(&self, controller: &str, command: &str, params: &[(&str, String)]) -> Result<()> {
        info!(client = %self.name, "{}/{}", controller, command);
        self.server.call(&self.command_url(controller, command, params))?;
        Ok(())
    }
}

pub struct Navigation<'a> {
    client: &'a Client,
}

impl Navigation<'_> {
    pub fn send(&self, command: NavigationCommand) -> Result<()> {
        self.client.execute(NAVIGATION, command.as_str(), &[])
    }
}

pub struct Playback<'a> {
    client: &'a Client,
}

impl Playback<'_> {
    pub fn send(&self, command: PlaybackCommand) -> Result<()> {
        self.client.execute(PLAYBACK, command.as_str(), &[])
    }
}

pub struct Application<'a> {
    client: &'a Client,
}

impl Application<'_> {
    /// Starts playing `item`, optionally at `view_offset` milliseconds.
    ///
    /// The item may come from any server; the path points at the server that
    /// relays the command.
    pub fn play_media<E: Entity + ?Sized>(&self, item: &E, view_offset: Option<i64>) -> Result<()> {
        let rating_key = item.key().ok_or_else(|| LibraryError::MissingKey {
            kind: item.kind().to_string(),
        })?;
        let key = endpoint::metadata_path(rating_key);
        let mut params = vec![
            ("key", key.clone()),
            ("path", format!("{}{}", self.client.server.base_url(), key)),
        ];
        if let Some(offset) = view_offset.filter(|offset| *offset > 0) {
            params.push(("viewOffset", offset.to_string()));
        }
        self.client.execute(APPLICATION, "playMedia", &params)
    }

    /// Volume as a percentage; values above 100 are clamped.
    pub fn set_volume(&self, level: u8) -> Result<()> {
        let level = level.min(100);
        self.client
            .execute(APPLICATION, "setVolume", &[("level", level.to_string())])
    }
}
