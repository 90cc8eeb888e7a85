//! Oracle trait: opaque text-in/text-out generation service.

use async_trait::async_trait;

use crate::error::Result;

/// External text generator consulted when no FAQ entry matches.
#[async_trait]
pub trait Oracle: Send + Sync {
    /// Oracle name (e.g. "gemini", "static").
    fn name(&self) -> &str;

    /// Generate a reply for a fully rendered prompt.
    async fn generate(&self, prompt: &str) -> Result<String>;
}
