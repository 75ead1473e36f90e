//! Construction-time configuration for index stores

use std::str::FromStr;
use tracing::warn;

/// Environment variable overriding [`StoreConfig::initial_capacity`]
pub const INITIAL_CAPACITY_ENV: &str = "VOCAB_INITIAL_CAPACITY";
/// Environment variable overriding [`StoreConfig::trace_interning`]
pub const TRACE_INTERNING_ENV: &str = "VOCAB_TRACE_INTERNING";

/// Configuration applied when a store is created
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StoreConfig {
    /// Number of values to reserve room for up front
    pub initial_capacity: usize,
    /// Emit a trace event for every newly interned value
    pub trace_interning: bool,
}

impl StoreConfig {
    /// Create configuration from environment variables
    pub fn from_environment() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create configuration from an arbitrary key lookup.
    ///
    /// Missing keys keep their defaults. Values that fail to parse are logged
    /// and ignored.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            initial_capacity: parse_override(&lookup, INITIAL_CAPACITY_ENV)
                .unwrap_or(defaults.initial_capacity),
            trace_interning: parse_override(&lookup, TRACE_INTERNING_ENV)
                .unwrap_or(defaults.trace_interning),
        }
    }

    /// Set the number of values to reserve room for
    pub fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    /// Enable or disable per-value trace events
    pub fn with_trace_interning(mut self, enabled: bool) -> Self {
        self.trace_interning = enabled;
        self
    }
}

fn parse_override<F, T>(lookup: &F, key: &str) -> Option<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(key, value = %raw, "Ignoring unparseable configuration override");
            None
        }
    }
}
