//! Service Bus JMS configuration: load, validate and resolve the settings a
//! JMS client needs to reach an Azure Service Bus namespace.

pub mod config;
pub mod jms;
pub mod observability;

pub use config::schema::ServiceBusJmsConfig;
pub use jms::{ConnectionFactorySettings, ListenerContainerSettings, SetupError};
