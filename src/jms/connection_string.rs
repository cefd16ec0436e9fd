//! Service Bus connection string parsing.
//!
//! Format: `Endpoint=sb://<namespace>.servicebus.windows.net/;SharedAccessKeyName=<name>;SharedAccessKey=<key>`
//! with an optional `EntityPath=<queue-or-topic>`. Keys are matched
//! case-insensitively; values are split at the first `=` so base64 keys
//! with padding survive.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectionStringError {
    #[error("connection string segment {0:?} is not a Key=Value pair")]
    MalformedSegment(String),

    #[error("connection string is missing {0}")]
    MissingPart(&'static str),

    #[error("connection string Endpoint {0:?} is not a valid URL with a host")]
    InvalidEndpoint(String),
}

/// Credentials and host extracted from a connection string.
#[derive(Clone, PartialEq, Eq)]
pub struct ServiceBusKey {
    pub host: String,
    pub shared_access_key_name: String,
    pub shared_access_key: String,
    pub entity_path: Option<String>,
}

impl ServiceBusKey {
    pub fn parse(connection_string: &str) -> Result<Self, ConnectionStringError> {
        let mut endpoint = None;
        let mut key_name = None;
        let mut key = None;
        let mut entity_path = None;

        for segment in connection_string.split(';').map(str::trim).filter(|s| !s.is_empty()) {
            let (name, value) = segment
                .split_once('=')
                .ok_or_else(|| ConnectionStringError::MalformedSegment(segment.to_string()))?;
            let value = value.trim().to_string();

            match name.trim() {
                n if n.eq_ignore_ascii_case("Endpoint") => endpoint = Some(value),
                n if n.eq_ignore_ascii_case("SharedAccessKeyName") => key_name = Some(value),
                n if n.eq_ignore_ascii_case("SharedAccessKey") => key = Some(value),
                n if n.eq_ignore_ascii_case("EntityPath") => entity_path = Some(value),
                // other keys (e.g. TransportType) do not affect JMS setup
                _ => {}
            }
        }

        let endpoint = endpoint.ok_or(ConnectionStringError::MissingPart("Endpoint"))?;
        let host = Url::parse(&endpoint)
            .ok()
            .and_then(|url| url.host_str().map(str::to_string))
            .filter(|h| !h.is_empty())
            .ok_or_else(|| ConnectionStringError::InvalidEndpoint(endpoint.clone()))?;

        Ok(Self {
            host,
            shared_access_key_name: key_name
                .filter(|v| !v.is_empty())
                .ok_or(ConnectionStringError::MissingPart("SharedAccessKeyName"))?,
            shared_access_key: key
                .filter(|v| !v.is_empty())
                .ok_or(ConnectionStringError::MissingPart("SharedAccessKey"))?,
            entity_path: entity_path.filter(|v| !v.is_empty()),
        })
    }
}

impl FromStr for ServiceBusKey {
    type Err = ConnectionStringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Debug for ServiceBusKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceBusKey")
            .field("host", &self.host)
            .field("shared_access_key_name", &self.shared_access_key_name)
            .field("shared_access_key", &"***")
            .field("entity_path", &self.entity_path)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CS: &str = "Endpoint=sb://orders.servicebus.windows.net/;SharedAccessKeyName=RootManageSharedAccessKey;SharedAccessKey=abc+def/ghi=";

    #[test]
    fn test_parse_standard_connection_string() {
        let key = ServiceBusKey::parse(CS).unwrap();
        assert_eq!(key.host, "orders.servicebus.windows.net");
        assert_eq!(key.shared_access_key_name, "RootManageSharedAccessKey");
        assert_eq!(key.shared_access_key, "abc+def/ghi=");
        assert_eq!(key.entity_path, None);
    }

    #[test]
    fn test_keys_case_insensitive_and_trailing_separator() {
        let key: ServiceBusKey = "endpoint=sb://ns.example.net;sharedaccesskeyname=n; SHAREDACCESSKEY = k ;EntityPath=q1;"
            .parse()
            .unwrap();
        assert_eq!(key.host, "ns.example.net");
        assert_eq!(key.shared_access_key_name, "n");
        assert_eq!(key.shared_access_key, "k");
        assert_eq!(key.entity_path.as_deref(), Some("q1"));
    }

    #[test]
    fn test_missing_parts() {
        assert_eq!(
            ServiceBusKey::parse("Endpoint=sb://x").unwrap_err(),
            ConnectionStringError::MissingPart("SharedAccessKeyName")
        );
        assert_eq!(
            ServiceBusKey::parse("Endpoint=sb://x;SharedAccessKeyName=n").unwrap_err(),
            ConnectionStringError::MissingPart("SharedAccessKey")
        );
        assert_eq!(
            ServiceBusKey::parse("SharedAccessKeyName=n;SharedAccessKey=k").unwrap_err(),
            ConnectionStringError::MissingPart("Endpoint")
        );
    }

    #[test]
    fn test_invalid_endpoint_and_segment() {
        assert!(matches!(
            ServiceBusKey::parse("Endpoint=not a url;SharedAccessKeyName=n;SharedAccessKey=k"),
            Err(ConnectionStringError::InvalidEndpoint(_))
        ));
        assert!(matches!(
            ServiceBusKey::parse("Endpoint=sb://x;garbage"),
            Err(ConnectionStringError::MalformedSegment(s)) if s == "garbage"
        ));
    }

    #[test]
    fn test_debug_hides_key() {
        let key = ServiceBusKey::parse(CS).unwrap();
        let debug = format!("{:?}", key);
        assert!(!debug.contains("abc+def"));
        assert!(debug.contains("orders.servicebus.windows.net"));
    }
}
