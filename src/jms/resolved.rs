//! Everything `show` prints: the connection factory plus one listener
//! container per destination kind the tier offers.

use serde::Serialize;

use crate::config::ServiceBusJmsConfig;
use crate::jms::connection_factory::ConnectionFactorySettings;
use crate::jms::listener_factory::ListenerContainerSettings;
use crate::jms::SetupError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ResolvedSettings {
    /// Password already masked.
    pub connection: ConnectionFactorySettings,
    pub queue_listener: ListenerContainerSettings,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic_listener: Option<ListenerContainerSettings>,
}

/// Resolve every factory for display. Topic settings are left out on tiers
/// without topics instead of failing.
pub fn resolve_all(config: &ServiceBusJmsConfig) -> Result<ResolvedSettings, SetupError> {
    let topics = config.tier().is_some_and(|t| t.supports_topics());

    Ok(ResolvedSettings {
        connection: ConnectionFactorySettings::from_config(config)?.redacted(),
        queue_listener: ListenerContainerSettings::for_queue(config)?,
        topic_listener: if topics {
            Some(ListenerContainerSettings::for_topic(config)?)
        } else {
            None
        },
    })
}
