//! Configuration schema definitions.
//!
//! This module defines the settings holder for a Service Bus JMS client.
//! All types derive Serde traits for deserialization from config files;
//! keys are kebab-case (`connection-string`, `prefetch-policy.all`, ...).

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::loader::ConfigError;
use crate::config::prefetch::PrefetchPolicy;
use crate::config::validation::{validate_config, PricingTier};

/// Default AMQP idle timeout: 30 minutes.
pub const DEFAULT_IDLE_TIMEOUT_MS: u64 = 1_800_000;

/// Root settings for connecting to a Service Bus namespace over JMS.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct ServiceBusJmsConfig {
    /// Namespace connection string (`Endpoint=sb://...;SharedAccessKeyName=...;SharedAccessKey=...`).
    pub connection_string: Option<String>,

    /// JMS client id. Only used by the topic listener container factory.
    pub topic_client_id: Option<String>,

    /// AMQP idle timeout in milliseconds.
    pub idle_timeout: u64,

    /// Namespace pricing tier: premium, standard or basic.
    pub pricing_tier: Option<String>,

    /// Listener container options.
    pub listener: ListenerConfig,

    /// Consumer prefetch policy.
    pub prefetch_policy: PrefetchPolicy,
}

impl Default for ServiceBusJmsConfig {
    fn default() -> Self {
        Self {
            connection_string: None,
            topic_client_id: None,
            idle_timeout: DEFAULT_IDLE_TIMEOUT_MS,
            pricing_tier: None,
            listener: ListenerConfig::default(),
            prefetch_policy: PrefetchPolicy::default(),
        }
    }
}

impl ServiceBusJmsConfig {
    /// Validate the top-level settings.
    ///
    /// Meant to be called once, right after all fields are populated.
    /// Every failing key is reported, not just the first.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_config(self).map_err(ConfigError::Validation)
    }

    /// Idle timeout as a [`Duration`].
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_millis(self.idle_timeout)
    }

    /// Parsed pricing tier, if the raw value is one of the accepted literals.
    pub fn tier(&self) -> Option<PricingTier> {
        self.pricing_tier.as_deref().and_then(|t| t.parse().ok())
    }
}

/// Options for JMS listener containers.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct ListenerConfig {
    /// Whether the reply destination is a topic. Topic factory only.
    pub reply_pub_sub_domain: Option<bool>,

    /// Quality of service used when sending a reply.
    pub reply_qos: Option<ReplyQosConfig>,

    /// Whether to make the subscription durable. Topic factory only.
    pub subscription_durable: bool,

    /// Whether to make the subscription shared. Topic factory only.
    pub subscription_shared: Option<bool>,

    /// Phase in which the container is started and stopped.
    pub phase: Option<i32>,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            reply_pub_sub_domain: None,
            reply_qos: None,
            subscription_durable: true,
            subscription_shared: None,
            phase: None,
        }
    }
}

/// Reply quality-of-service settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct ReplyQosConfig {
    pub delivery_mode: DeliveryMode,

    /// JMS message priority.
    pub priority: u8,

    /// Time to live in milliseconds (0 = unlimited).
    pub time_to_live: u64,
}

impl Default for ReplyQosConfig {
    fn default() -> Self {
        Self {
            delivery_mode: DeliveryMode::Persistent,
            priority: 4,
            time_to_live: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeliveryMode {
    #[default]
    Persistent,
    NonPersistent,
}

impl DeliveryMode {
    /// JMS wire constant (`DeliveryMode.PERSISTENT` = 2, `NON_PERSISTENT` = 1).
    pub fn code(self) -> i32 {
        match self {
            DeliveryMode::Persistent => 2,
            DeliveryMode::NonPersistent => 1,
        }
    }
}
