//! Connection factory settings derived from the configuration.

use serde::Serialize;
use url::Url;

use crate::config::{EffectivePrefetch, ServiceBusJmsConfig};
use crate::jms::connection_string::{ConnectionStringError, ServiceBusKey};
use crate::jms::SetupError;

/// Everything a JMS (AMQP 1.0) connection factory needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ConnectionFactorySettings {
    /// `amqps://<host>?amqp.idleTimeout=<ms>`
    pub remote_uri: String,
    pub username: String,
    pub password: String,
    pub client_id: Option<String>,
    /// Queue or topic named by `EntityPath` in the connection string.
    pub entity_path: Option<String>,
    pub prefetch: EffectivePrefetch,
}

impl ConnectionFactorySettings {
    /// Validate `config` and resolve its connection settings.
    pub fn from_config(config: &ServiceBusJmsConfig) -> Result<Self, SetupError> {
        config.validate()?;

        let connection_string = config.connection_string.as_deref().unwrap_or_default();
        let key = ServiceBusKey::parse(connection_string)?;
        let remote_uri = remote_uri(&key.host, config.idle_timeout)?;

        tracing::debug!(
            remote_uri = %remote_uri,
            username = %key.shared_access_key_name,
            client_id = ?config.topic_client_id,
            "Resolved connection factory settings"
        );

        Ok(Self {
            remote_uri,
            username: key.shared_access_key_name,
            password: key.shared_access_key,
            client_id: config.topic_client_id.clone(),
            entity_path: key.entity_path,
            prefetch: config.prefetch_policy.effective(),
        })
    }

    /// Copy with the password masked, for display.
    pub fn redacted(&self) -> Self {
        Self {
            password: "***".to_string(),
            ..self.clone()
        }
    }
}

/// Build the AMQP remote URI for `host`.
pub fn remote_uri(host: &str, idle_timeout_ms: u64) -> Result<String, ConnectionStringError> {
    let mut uri = Url::parse(&format!("amqps://{}", host))
        .map_err(|_| ConnectionStringError::InvalidEndpoint(host.to_string()))?;
    uri.query_pairs_mut()
        .append_pair("amqp.idleTimeout", &idle_timeout_ms.to_string());
    Ok(uri.to_string())
}
