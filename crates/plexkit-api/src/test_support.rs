use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde_json::Value;

use crate::error::TransportError;
use crate::server::Server;
use crate::transport::{decode_body, DecodedBody, NetworkCaller};

pub(crate) const BASE_URL: &str = "http://10.0.0.5:32400";

/// In-memory caller returning canned JSON bodies and recording requested URLs.
#[derive(Default)]
pub(crate) struct MockCaller {
    responses: Mutex<HashMap<String, Value>>,
    calls: Mutex<Vec<String>>,
}

impl MockCaller {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Registers `body` for `BASE_URL + path`.
    pub(crate) fn respond(self, path: &str, body: Value) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert(format!("{}{}", BASE_URL, path), body);
        self
    }

    pub(crate) fn into_caller(self) -> Arc<dyn NetworkCaller> {
        Arc::new(self)
    }

    /// Requested paths, relative to `BASE_URL`.
    pub(crate) fn paths(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|url| url.trim_start_matches(BASE_URL).to_string())
            .collect()
    }
}

impl NetworkCaller for MockCaller {
    fn call(&self, url: &str) -> Result<DecodedBody, TransportError> {
        self.calls.lock().unwrap().push(url.to_string());
        let body = self
            .responses
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(|| TransportError::new(404, format!("no canned response for {}", url)))?;
        decode_body(body)
    }
}

/// Server on `BASE_URL` backed by `mock`.
pub(crate) fn mock_server(mock: &Arc<MockCaller>) -> Arc<Server> {
    let caller: Arc<dyn NetworkCaller> = mock.clone();
    Arc::new(Server::new("test", "10.0.0.5", None, caller))
}

/// `{"MediaContainer": {"Metadata": records}}`.
pub(crate) fn container(records: Value) -> Value {
    serde_json::json!({ "MediaContainer": { "Metadata": records } })
}
