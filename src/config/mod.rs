//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, [servicebus] table)
//!     → loader.rs (parse & deserialize)
//!     → loader.rs (SERVICEBUS_* environment overlay)
//!     → validation.rs (semantic checks)
//!     → ServiceBusJmsConfig (validated, read-only from here on)
//!     → jms::* resolves connection and listener factory settings
//! ```
//!
//! # Design Decisions
//! - Config is read-only once loaded; nothing downstream mutates it
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - Prefetch fallbacks are computed at read time, never stored

pub mod loader;
pub mod prefetch;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use prefetch::{EffectivePrefetch, PrefetchPolicy};
pub use schema::{DeliveryMode, ListenerConfig, ReplyQosConfig, ServiceBusJmsConfig};
pub use validation::{PricingTier, ValidationError};

/// Key prefix shared by every setting, used in error messages.
pub const PROPERTY_PREFIX: &str = "servicebus";
