//! JMS setup resolution.
//!
//! # Data Flow
//! ```text
//! ServiceBusJmsConfig (validated)
//!     → connection_string.rs (host + SAS credentials)
//!     → connection_factory.rs (amqps remote URI, credentials, prefetch)
//!     → listener_factory.rs (queue / topic container settings)
//!     → resolved.rs (all of the above, password masked, for display)
//! ```
//!
//! # Design Decisions
//! - Pure functions over a borrowed config; nothing here opens a connection
//! - Topic settings are refused for tiers without topic support

pub mod connection_factory;
pub mod connection_string;
pub mod listener_factory;
pub mod resolved;

use thiserror::Error;

use crate::config::{ConfigError, PricingTier};

pub use connection_factory::ConnectionFactorySettings;
pub use connection_string::{ConnectionStringError, ServiceBusKey};
pub use listener_factory::{DestinationKind, ListenerContainerSettings};
pub use resolved::{resolve_all, ResolvedSettings};

#[derive(Debug, Error)]
pub enum SetupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("invalid 'servicebus.connection-string': {0}")]
    ConnectionString(#[from] ConnectionStringError),

    #[error("pricing tier '{0}' does not support topics")]
    TopicsNotSupported(PricingTier),
}
