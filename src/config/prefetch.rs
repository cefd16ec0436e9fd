//! Consumer prefetch policy.
//!
//! Each destination-specific prefetch falls back to `all` when it is not
//! positive. `all` itself reads as zero when negative. Raw values are kept
//! as written so a later `set_all` still affects every unset field.

use serde::{Deserialize, Serialize};

/// Resolve a destination-specific prefetch against the group default.
pub fn effective_prefetch(specific: i32, all: i32) -> i32 {
    if specific > 0 {
        specific
    } else {
        all.max(0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct PrefetchPolicy {
    all: i32,
    durable_topic_prefetch: i32,
    queue_browser_prefetch: i32,
    queue_prefetch: i32,
    topic_prefetch: i32,
}

impl PrefetchPolicy {
    pub fn all(&self) -> i32 {
        self.all.max(0)
    }

    pub fn set_all(&mut self, all: i32) {
        self.all = all;
    }

    pub fn durable_topic_prefetch(&self) -> i32 {
        effective_prefetch(self.durable_topic_prefetch, self.all)
    }

    pub fn set_durable_topic_prefetch(&mut self, value: i32) {
        self.durable_topic_prefetch = value;
    }

    pub fn queue_browser_prefetch(&self) -> i32 {
        effective_prefetch(self.queue_browser_prefetch, self.all)
    }

    pub fn set_queue_browser_prefetch(&mut self, value: i32) {
        self.queue_browser_prefetch = value;
    }

    pub fn queue_prefetch(&self) -> i32 {
        effective_prefetch(self.queue_prefetch, self.all)
    }

    pub fn set_queue_prefetch(&mut self, value: i32) {
        self.queue_prefetch = value;
    }

    pub fn topic_prefetch(&self) -> i32 {
        effective_prefetch(self.topic_prefetch, self.all)
    }

    pub fn set_topic_prefetch(&mut self, value: i32) {
        self.topic_prefetch = value;
    }

    /// Snapshot of every effective value.
    pub fn effective(&self) -> EffectivePrefetch {
        EffectivePrefetch {
            all: self.all(),
            durable_topic: self.durable_topic_prefetch(),
            queue_browser: self.queue_browser_prefetch(),
            queue: self.queue_prefetch(),
            topic: self.topic_prefetch(),
        }
    }
}

/// Resolved prefetch values handed to the connection factory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct EffectivePrefetch {
    pub all: i32,
    pub durable_topic: i32,
    pub queue_browser: i32,
    pub queue: i32,
    pub topic: i32,
}
