//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Require a connection string with actual text in it
//! - Restrict the pricing tier to the accepted literals
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServiceBusJmsConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

use crate::config::schema::ServiceBusJmsConfig;

/// A single failed rule. The message names the offending key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("'servicebus.connection-string' should be provided")]
    MissingConnectionString,

    #[error("'servicebus.pricing-tier' is not valid: {}", display_tier(.0))]
    InvalidPricingTier(Option<String>),
}

fn display_tier(tier: &Option<String>) -> String {
    match tier {
        Some(t) => format!("{:?} (expected premium, standard or basic)", t),
        None => "not set (expected premium, standard or basic)".to_string(),
    }
}

impl ValidationError {
    /// Fully qualified key of the offending setting.
    pub fn key(&self) -> &'static str {
        match self {
            ValidationError::MissingConnectionString => "servicebus.connection-string",
            ValidationError::InvalidPricingTier(_) => "servicebus.pricing-tier",
        }
    }
}

/// Service Bus namespace pricing tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PricingTier {
    Premium,
    Standard,
    Basic,
}

impl PricingTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            PricingTier::Premium => "premium",
            PricingTier::Standard => "standard",
            PricingTier::Basic => "basic",
        }
    }

    /// Basic namespaces only offer queues.
    pub fn supports_topics(&self) -> bool {
        !matches!(self, PricingTier::Basic)
    }
}

impl fmt::Display for PricingTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not a known pricing tier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown pricing tier: {0:?}")]
pub struct UnknownPricingTier(pub String);

impl FromStr for PricingTier {
    type Err = UnknownPricingTier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [PricingTier::Premium, PricingTier::Standard, PricingTier::Basic]
            .into_iter()
            .find(|tier| tier.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownPricingTier(s.to_string()))
    }
}

/// True if `s` holds at least one character that is not whitespace.
///
/// Whitespace follows the JVM's `Character.isWhitespace`: Unicode separators
/// count, except the no-break spaces (U+00A0, U+2007, U+202F), and so do the
/// ASCII controls U+0009..U+000D and U+001C..U+001F. U+0085 does not.
pub fn has_text(s: &str) -> bool {
    s.chars().any(|c| !is_jvm_whitespace(c))
}

fn is_jvm_whitespace(c: char) -> bool {
    match c {
        '\u{09}'..='\u{0D}' | '\u{1C}'..='\u{1F}' => true,
        '\u{85}' | '\u{A0}' | '\u{2007}' | '\u{202F}' => false,
        _ => c.is_whitespace(),
    }
}

/// Check every semantic rule and collect the failures.
pub fn validate_config(config: &ServiceBusJmsConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let connection_ok = config
        .connection_string
        .as_deref()
        .is_some_and(has_text);
    if !connection_ok {
        errors.push(ValidationError::MissingConnectionString);
    }

    let tier_ok = config
        .pricing_tier
        .as_deref()
        .is_some_and(|t| t.parse::<PricingTier>().is_ok());
    if !tier_ok {
        errors.push(ValidationError::InvalidPricingTier(config.pricing_tier.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        for err in &errors {
            tracing::warn!(key = err.key(), "{}", err);
        }
        Err(errors)
    }
}
