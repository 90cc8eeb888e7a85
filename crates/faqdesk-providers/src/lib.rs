//! # FAQ Desk Providers
//!
//! Fallback oracles consulted when no FAQ entry matches a question that
//! mentions one of the configured keywords.
//!
//! - `GeminiOracle` calls the Gemini `generateContent` REST endpoint.
//! - `StaticOracle` returns a fixed reply (offline deployments, tests).

pub mod gemini;
pub mod static_oracle;
pub mod trigger;

use faqdesk_core::config::FallbackConfig;
use faqdesk_core::error::{FaqError, Result};
use faqdesk_core::traits::Oracle;
use std::sync::Arc;

pub use gemini::GeminiOracle;
pub use static_oracle::StaticOracle;
pub use trigger::{KeywordTrigger, PromptTemplate};

/// Create the configured oracle, or `None` when the fallback is disabled.
pub fn create_oracle(config: &FallbackConfig) -> Result<Option<Arc<dyn Oracle>>> {
    if !config.enabled {
        return Ok(None);
    }
    match config.provider.as_str() {
        "gemini" => Ok(Some(Arc::new(GeminiOracle::from_config(config)?))),
        "static" => Ok(Some(Arc::new(StaticOracle::new(&config.static_reply)))),
        other => Err(FaqError::Config(format!(
            "Unknown fallback provider: {other} (available: {})",
            available_oracles().join(", ")
        ))),
    }
}

/// List all available oracle names.
pub fn available_oracles() -> Vec<&'static str> {
    vec!["gemini", "static"]
}
