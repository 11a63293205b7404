//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - One endpoint per shard, shard 0 excluded
//! - Validate value ranges (timeout > 0, known log level)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: SdkConfig → Result<(), Vec<ValidationError>>

use std::fmt;

use crate::config::schema::SdkConfig;

/// A single semantic problem in a config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Check `config` and report every problem found.
pub fn validate_config(config: &SdkConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let network = &config.network;

    if network.shard_count == 0 {
        errors.push(ValidationError::new("network.shard_count", "must be at least 1"));
    }

    if network.endpoints.len() != usize::from(network.shard_count) {
        errors.push(ValidationError::new(
            "network.endpoints",
            format!(
                "expected one endpoint per shard ({}), got {}",
                network.shard_count,
                network.endpoints.len()
            ),
        ));
    }

    for (i, url) in network.endpoints.iter().enumerate() {
        if !matches!(url.scheme(), "http" | "https") {
            errors.push(ValidationError::new(
                format!("network.endpoints[{}]", i),
                format!("unsupported scheme '{}' in {}", url.scheme(), url),
            ));
        }
    }

    if config.rpc.timeout_ms == 0 {
        errors.push(ValidationError::new("rpc.timeout_ms", "must be greater than 0"));
    }

    let level = config.observability.log_level.to_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::new(
            "observability.log_level",
            format!("unknown level '{}'", config.observability.log_level),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
