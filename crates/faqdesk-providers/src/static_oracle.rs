//! Fixed-reply oracle.

use async_trait::async_trait;
use faqdesk_core::error::Result;
use faqdesk_core::traits::Oracle;

pub struct StaticOracle {
    reply: String,
}

impl StaticOracle {
    pub fn new(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
        }
    }
}

#[async_trait]
impl Oracle for StaticOracle {
    fn name(&self) -> &str {
        "static"
    }

    async fn generate(&self, _prompt: &str) -> Result<String> {
        Ok(self.reply.clone())
    }
}
