//! Listener container settings for queues and topics.
//!
//! Queue containers only take the reply QoS and phase. Topic containers
//! also take the client id and the subscription options, which is where
//! `topic-client-id`, `reply-pub-sub-domain`, `subscription-durable` and
//! `subscription-shared` end up.

use serde::Serialize;

use crate::config::{ReplyQosConfig, ServiceBusJmsConfig};
use crate::jms::SetupError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DestinationKind {
    Queue,
    Topic,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ListenerContainerSettings {
    pub destination: DestinationKind,
    pub pub_sub_domain: bool,
    pub client_id: Option<String>,
    pub reply_pub_sub_domain: Option<bool>,
    pub reply_qos: Option<ReplyQosConfig>,
    pub subscription_durable: Option<bool>,
    pub subscription_shared: Option<bool>,
    pub phase: Option<i32>,
}

impl ListenerContainerSettings {
    /// Point-to-point container.
    pub fn for_queue(config: &ServiceBusJmsConfig) -> Result<Self, SetupError> {
        config.validate()?;

        Ok(Self {
            destination: DestinationKind::Queue,
            pub_sub_domain: false,
            client_id: None,
            reply_pub_sub_domain: None,
            reply_qos: config.listener.reply_qos,
            subscription_durable: None,
            subscription_shared: None,
            phase: config.listener.phase,
        })
    }

    /// Publish/subscribe container. Refused on tiers without topics.
    pub fn for_topic(config: &ServiceBusJmsConfig) -> Result<Self, SetupError> {
        config.validate()?;

        if let Some(tier) = config.tier().filter(|t| !t.supports_topics()) {
            return Err(SetupError::TopicsNotSupported(tier));
        }

        let listener = &config.listener;
        Ok(Self {
            destination: DestinationKind::Topic,
            pub_sub_domain: true,
            client_id: config.topic_client_id.clone(),
            reply_pub_sub_domain: listener.reply_pub_sub_domain,
            reply_qos: listener.reply_qos,
            subscription_durable: Some(listener.subscription_durable),
            subscription_shared: listener.subscription_shared,
            phase: listener.phase,
        })
    }
}
