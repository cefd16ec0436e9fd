//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! config loader / validation / jms resolution
//!     → tracing events (structured fields, never secrets)
//!     → logging.rs subscriber (stderr, EnvFilter)
//! ```

pub mod logging;
