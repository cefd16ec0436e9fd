//! Configuration loading from disk and environment.

use std::env;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::config::schema::ServiceBusJmsConfig;
use crate::config::validation::ValidationError;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {var}: {value:?} ({expected})")]
    InvalidEnv {
        var: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// On-disk layout: everything lives under a `[servicebus]` table.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    servicebus: ServiceBusJmsConfig,
}

/// Parse a TOML document. No environment overlay, no validation.
pub fn parse_config(content: &str) -> Result<ServiceBusJmsConfig, ConfigError> {
    let file: ConfigFile = toml::from_str(content)?;
    Ok(file.servicebus)
}

/// Overlay `SERVICEBUS_*` variables onto `config`.
///
/// `lookup` returns the value of a variable, if set. Production code passes
/// the process environment; tests pass a map. Either every override is
/// applied or, on error, `config` is left unchanged.
pub fn apply_env_overrides<F>(config: &mut ServiceBusJmsConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut staged = config.clone();
    overlay_env(&mut staged, lookup)?;
    *config = staged;
    Ok(())
}

fn overlay_env<F>(config: &mut ServiceBusJmsConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |var: &'static str| {
        let value = lookup(var);
        if value.is_some() {
            tracing::debug!(var, "Applying environment override");
        }
        value
    };

    if let Some(v) = get("SERVICEBUS_CONNECTION_STRING") {
        config.connection_string = Some(v);
    }
    if let Some(v) = get("SERVICEBUS_TOPIC_CLIENT_ID") {
        config.topic_client_id = Some(v);
    }
    if let Some(v) = get("SERVICEBUS_IDLE_TIMEOUT") {
        config.idle_timeout = parse_env("SERVICEBUS_IDLE_TIMEOUT", v, "non-negative integer")?;
    }
    if let Some(v) = get("SERVICEBUS_PRICING_TIER") {
        config.pricing_tier = Some(v);
    }

    let prefetch = &mut config.prefetch_policy;
    if let Some(v) = get("SERVICEBUS_PREFETCH_ALL") {
        prefetch.set_all(parse_env("SERVICEBUS_PREFETCH_ALL", v, "integer")?);
    }
    if let Some(v) = get("SERVICEBUS_PREFETCH_DURABLE_TOPIC") {
        prefetch.set_durable_topic_prefetch(parse_env("SERVICEBUS_PREFETCH_DURABLE_TOPIC", v, "integer")?);
    }
    if let Some(v) = get("SERVICEBUS_PREFETCH_QUEUE_BROWSER") {
        prefetch.set_queue_browser_prefetch(parse_env("SERVICEBUS_PREFETCH_QUEUE_BROWSER", v, "integer")?);
    }
    if let Some(v) = get("SERVICEBUS_PREFETCH_QUEUE") {
        prefetch.set_queue_prefetch(parse_env("SERVICEBUS_PREFETCH_QUEUE", v, "integer")?);
    }
    if let Some(v) = get("SERVICEBUS_PREFETCH_TOPIC") {
        prefetch.set_topic_prefetch(parse_env("SERVICEBUS_PREFETCH_TOPIC", v, "integer")?);
    }

    let listener = &mut config.listener;
    if let Some(v) = get("SERVICEBUS_LISTENER_PHASE") {
        listener.phase = Some(parse_env("SERVICEBUS_LISTENER_PHASE", v, "integer")?);
    }
    if let Some(v) = get("SERVICEBUS_LISTENER_SUBSCRIPTION_DURABLE") {
        listener.subscription_durable = parse_bool("SERVICEBUS_LISTENER_SUBSCRIPTION_DURABLE", v)?;
    }
    if let Some(v) = get("SERVICEBUS_LISTENER_SUBSCRIPTION_SHARED") {
        listener.subscription_shared = Some(parse_bool("SERVICEBUS_LISTENER_SUBSCRIPTION_SHARED", v)?);
    }
    if let Some(v) = get("SERVICEBUS_LISTENER_REPLY_PUB_SUB_DOMAIN") {
        listener.reply_pub_sub_domain = Some(parse_bool("SERVICEBUS_LISTENER_REPLY_PUB_SUB_DOMAIN", v)?);
    }

    Ok(())
}

fn parse_env<T: std::str::FromStr>(
    var: &'static str,
    value: String,
    expected: &'static str,
) -> Result<T, ConfigError> {
    let parsed = value.trim().parse::<T>();
    parsed.map_err(|_| ConfigError::InvalidEnv { var, value, expected })
}

fn parse_bool(var: &'static str, value: String) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ConfigError::InvalidEnv { var, value, expected: "true or false" }),
    }
}

/// Load and validate configuration from a TOML file, with the process
/// environment overlaid.
pub fn load_config(path: &Path) -> Result<ServiceBusJmsConfig, ConfigError> {
    load_config_with_env(path, |var| env::var(var).ok())
}

/// Load and validate a file, ignoring `SERVICEBUS_*` variables.
pub fn load_config_without_env(path: &Path) -> Result<ServiceBusJmsConfig, ConfigError> {
    load_config_with_env(path, |_| None)
}

/// Like [`load_config`], reading overrides through `lookup`.
pub fn load_config_with_env<F>(path: &Path, lookup: F) -> Result<ServiceBusJmsConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let content = fs::read_to_string(path)?;
    let mut config = parse_config(&content)?;

    apply_env_overrides(&mut config, lookup)?;
    config.validate()?;

    tracing::info!(
        path = %path.display(),
        pricing_tier = config.pricing_tier.as_deref().unwrap_or_default(),
        idle_timeout_ms = config.idle_timeout,
        "Configuration loaded"
    );

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn test_parse_full_document() {
        let config = parse_config(
            r#"
            [servicebus]
            connection-string = "Endpoint=sb://ns.servicebus.windows.net/;SharedAccessKeyName=k;SharedAccessKey=s"
            topic-client-id = "orders-client"
            idle-timeout = 60000
            pricing-tier = "Standard"

            [servicebus.listener]
            reply-pub-sub-domain = true
            subscription-durable = false
            subscription-shared = true
            phase = 10

            [servicebus.listener.reply-qos]
            delivery-mode = "non-persistent"
            priority = 7
            time-to-live = 5000

            [servicebus.prefetch-policy]
            all = 10
            queue-prefetch = 25
            "#,
        )
        .unwrap();

        assert_eq!(config.topic_client_id.as_deref(), Some("orders-client"));
        assert_eq!(config.idle_timeout, 60_000);
        assert_eq!(config.pricing_tier.as_deref(), Some("Standard"));
        assert_eq!(config.listener.reply_pub_sub_domain, Some(true));
        assert!(!config.listener.subscription_durable);
        assert_eq!(config.listener.subscription_shared, Some(true));
        assert_eq!(config.listener.phase, Some(10));
        let qos = config.listener.reply_qos.unwrap();
        assert_eq!(qos.delivery_mode, crate::config::DeliveryMode::NonPersistent);
        assert_eq!(qos.priority, 7);
        assert_eq!(qos.time_to_live, 5000);
        assert_eq!(config.prefetch_policy.queue_prefetch(), 25);
        assert_eq!(config.prefetch_policy.topic_prefetch(), 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config, ServiceBusJmsConfig::default());
        assert_eq!(config.idle_timeout, 1_800_000);
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let err = parse_config("[servicebus]\nconnection-strng = \"x\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_negative_idle_timeout_rejected() {
        let err = parse_config("[servicebus]\nidle-timeout = -1\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_env_overrides_file_values() {
        let mut config = parse_config("[servicebus]\npricing-tier = \"basic\"\nidle-timeout = 5\n").unwrap();
        apply_env_overrides(
            &mut config,
            lookup(&[
                ("SERVICEBUS_CONNECTION_STRING", "Endpoint=sb://from-env"),
                ("SERVICEBUS_PRICING_TIER", "premium"),
                ("SERVICEBUS_IDLE_TIMEOUT", " 120000 "),
                ("SERVICEBUS_PREFETCH_ALL", "-4"),
                ("SERVICEBUS_PREFETCH_TOPIC", "300"),
                ("SERVICEBUS_LISTENER_SUBSCRIPTION_DURABLE", "FALSE"),
                ("SERVICEBUS_LISTENER_PHASE", "-2"),
            ]),
        )
        .unwrap();

        assert_eq!(config.connection_string.as_deref(), Some("Endpoint=sb://from-env"));
        assert_eq!(config.pricing_tier.as_deref(), Some("premium"));
        assert_eq!(config.idle_timeout, 120_000);
        assert_eq!(config.prefetch_policy.all(), 0);
        assert_eq!(config.prefetch_policy.topic_prefetch(), 300);
        assert!(!config.listener.subscription_durable);
        assert_eq!(config.listener.phase, Some(-2));
    }

    #[test]
    fn test_no_env_leaves_config_untouched() {
        let mut config = ServiceBusJmsConfig::default();
        apply_env_overrides(&mut config, |_| None).unwrap();
        assert_eq!(config, ServiceBusJmsConfig::default());
    }

    #[test]
    fn test_bad_env_values_name_variable() {
        let mut config = ServiceBusJmsConfig::default();
        let err = apply_env_overrides(&mut config, lookup(&[("SERVICEBUS_IDLE_TIMEOUT", "soon")])).unwrap_err();
        match err {
            ConfigError::InvalidEnv { var, value, .. } => {
                assert_eq!(var, "SERVICEBUS_IDLE_TIMEOUT");
                assert_eq!(value, "soon");
            }
            other => panic!("unexpected error: {other}"),
        }

        let err = apply_env_overrides(
            &mut config,
            lookup(&[("SERVICEBUS_LISTENER_SUBSCRIPTION_SHARED", "yes")]),
        )
        .unwrap_err();
        assert!(err.to_string().contains("SERVICEBUS_LISTENER_SUBSCRIPTION_SHARED"));
    }

    #[test]
    fn test_failed_override_leaves_config_unchanged() {
        let mut config = parse_config("[servicebus]\npricing-tier = \"basic\"\n").unwrap();
        let before = config.clone();

        let err = apply_env_overrides(
            &mut config,
            lookup(&[
                ("SERVICEBUS_CONNECTION_STRING", "Endpoint=sb://from-env"),
                ("SERVICEBUS_PRICING_TIER", "premium"),
                ("SERVICEBUS_PREFETCH_QUEUE", "lots"),
            ]),
        )
        .unwrap_err();

        assert!(matches!(err, ConfigError::InvalidEnv { var: "SERVICEBUS_PREFETCH_QUEUE", .. }));
        assert_eq!(config, before);
    }

    #[test]
    fn test_validation_error_lists_every_key() {
        let err = ServiceBusJmsConfig::default().validate().unwrap_err();
        let msg = err.to_string();
        assert!(msg.starts_with("Validation failed: "));
        assert!(msg.contains("'servicebus.connection-string' should be provided"));
        assert!(msg.contains("'servicebus.pricing-tier' is not valid"));
    }
}
