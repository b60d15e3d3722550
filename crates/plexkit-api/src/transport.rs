//! The network seam.
//!
//! Everything above this module works on decoded [`RawRecord`]s. The bundled
//! [`HttpCaller`] speaks the server's JSON dialect; tests and alternative
//! transports implement [`NetworkCaller`] directly.

use std::time::Duration;

use plexkit_models::RawRecord;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT};
use serde_json::Value;
use tracing::debug;

use crate::error::TransportError;

/// List wrappers inside a `MediaContainer`, in the order they are concatenated.
const CONTAINER_LISTS: [&str; 6] = ["Directory", "Metadata", "Video", "Track", "Photo", "Server"];

/// Decoded response body.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedBody {
    Records(Vec<RawRecord>),
    Record(RawRecord),
}

impl DecodedBody {
    /// Body as a record list; a single mapping becomes a one-element list.
    pub fn into_records(self) -> Vec<RawRecord> {
        match self {
            DecodedBody::Records(records) => records,
            DecodedBody::Record(record) => vec![record],
        }
    }
}

/// Performs one blocking GET and returns the decoded body.
///
/// Implementations own timeouts and cancellation; callers never retry.
pub trait NetworkCaller: Send + Sync {
    fn call(&self, url: &str) -> Result<DecodedBody, TransportError>;
}

/// Options forwarded to the HTTP client untouched.
#[derive(Debug, Clone)]
pub struct HttpOptions {
    pub timeout: Option<Duration>,
    pub client_identifier: String,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            timeout: Some(Duration::from_secs(30)),
            client_identifier: "plexkit".to_string(),
        }
    }
}

pub struct HttpCaller {
    client: Client,
}

impl HttpCaller {
    pub fn new(token: Option<&str>, options: &HttpOptions) -> Result<Self, TransportError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(token) = token {
            headers.insert(
                HeaderName::from_static("x-plex-token"),
                HeaderValue::from_str(token).map_err(|_| TransportError::new(0, "Invalid token format"))?,
            );
        }
        headers.insert(
            HeaderName::from_static("x-plex-client-identifier"),
            HeaderValue::from_str(&options.client_identifier)
                .map_err(|_| TransportError::new(0, "Invalid client identifier"))?,
        );

        let mut builder = Client::builder().default_headers(headers);
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| TransportError::new(0, format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

impl NetworkCaller for HttpCaller {
    fn call(&self, url: &str) -> Result<DecodedBody, TransportError> {
        debug!("GET {}", url);
        let response = self.client.get(url).send().map_err(|e| {
            TransportError::new(e.status().map(|s| s.as_u16()).unwrap_or(0), e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::new(
                status.as_u16(),
                format!("GET {} returned {}", url, status),
            ));
        }

        let text = response
            .text()
            .map_err(|e| TransportError::new(status.as_u16(), format!("Failed to read body: {}", e)))?;
        // Player commands answer with an empty body.
        if text.trim().is_empty() {
            return Ok(DecodedBody::Records(Vec::new()));
        }

        let json: Value = serde_json::from_str(&text)
            .map_err(|e| TransportError::new(status.as_u16(), format!("Failed to parse response: {}", e)))?;
        decode_body(json)
    }
}

/// Unwraps the server's JSON envelope into records.
///
/// A `MediaContainer` always decodes as a list (empty when it carries no
/// list wrapper). Bare arrays and objects decode as records and a record.
pub fn decode_body(json: Value) -> Result<DecodedBody, TransportError> {
    match json {
        Value::Object(mut object) => match object.remove("MediaContainer") {
            Some(Value::Object(mut container)) => {
                let mut records = Vec::new();
                for list in CONTAINER_LISTS {
                    if let Some(value) = container.remove(list) {
                        records.extend(object_list(list, value)?);
                    }
                }
                Ok(DecodedBody::Records(records))
            }
            Some(other) => Err(TransportError::new(
                0,
                format!("MediaContainer is not an object: {}", other),
            )),
            None => Ok(DecodedBody::Record(object)),
        },
        Value::Array(values) => Ok(DecodedBody::Records(object_list("body", Value::Array(values))?)),
        other => Err(TransportError::new(0, format!("Unexpected response body: {}", other))),
    }
}

fn object_list(name: &str, value: Value) -> Result<Vec<RawRecord>, TransportError> {
    match value {
        Value::Array(values) => values
            .into_iter()
            .map(|value| match value {
                Value::Object(record) => Ok(record),
                other => Err(TransportError::new(
                    0,
                    format!("Non-object entry in {}: {}", name, other),
                )),
            })
            .collect(),
        Value::Object(record) => Ok(vec![record]),
        other => Err(TransportError::new(0, format!("{} is not a list: {}", name, other))),
    }
}
