//! Shared utilities for integration tests.

use std::io::Write;

use tempfile::NamedTempFile;

pub const CONNECTION_STRING: &str =
    "Endpoint=sb://orders.servicebus.windows.net/;SharedAccessKeyName=RootManageSharedAccessKey;SharedAccessKey=dGVzdC1rZXk=";

/// Write `content` to a temporary `.toml` file that lives as long as the handle.
pub fn write_config(content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("create temp config");
    file.write_all(content.as_bytes()).expect("write temp config");
    file.flush().expect("flush temp config");
    file
}

/// Minimal valid document for `tier`.
pub fn minimal_config(tier: &str) -> String {
    format!(
        "[servicebus]\nconnection-string = \"{}\"\npricing-tier = \"{}\"\n",
        CONNECTION_STRING, tier
    )
}

/// Environment lookup that never finds anything.
pub fn no_env(_: &str) -> Option<String> {
    None
}
