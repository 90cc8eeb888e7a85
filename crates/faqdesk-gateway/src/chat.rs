//! Chat pipeline: FAQ match first, keyword-gated oracle second.
//!
//! `answer` never fails. Store errors degrade to an empty FAQ set and oracle
//! errors become a readable answer, so the chat UI always gets a string.
//! Questions over `matcher.max_question_chars` are answered with the unknown
//! sentinel without being scored.

use faqdesk_core::config::FaqDeskConfig;
use faqdesk_core::error::FaqError;
use faqdesk_core::traits::Oracle;
use faqdesk_matcher::{MatchEngine, MatchOutcome, UNKNOWN_ANSWER};
use faqdesk_providers::{KeywordTrigger, PromptTemplate};
use faqdesk_store::FaqStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct Responder {
    store: FaqStore,
    engine: MatchEngine,
    max_question_chars: usize,
    oracle: Option<Arc<dyn Oracle>>,
    trigger: KeywordTrigger,
    prompt: PromptTemplate,
    error_prefix: String,
}

impl Responder {
    pub fn new(store: FaqStore, oracle: Option<Arc<dyn Oracle>>, config: &FaqDeskConfig) -> Self {
        let fallback = &config.fallback;
        Self {
            store,
            engine: MatchEngine::new(config.matcher.threshold),
            max_question_chars: config.matcher.max_question_chars,
            oracle,
            trigger: KeywordTrigger::new(&fallback.keywords),
            prompt: PromptTemplate::new(&fallback.prompt_template),
            error_prefix: fallback.error_prefix.clone(),
        }
    }

    /// Answer a user question.
    pub async fn answer(&self, question: &str) -> String {
        if question.chars().nth(self.max_question_chars).is_some() {
            tracing::warn!(
                "Question over {} chars ({} bytes), not scored",
                self.max_question_chars,
                question.len()
            );
            return UNKNOWN_ANSWER.to_string();
        }

        let sections = self.store.sections().unwrap_or_else(|e| {
            tracing::error!("FAQ store unavailable, answering without it: {e}");
            Vec::new()
        });

        if let MatchOutcome::Found { answer, score, .. } = self.engine.lookup(question, &sections) {
            tracing::info!("💬 FAQ hit (score {score:.1})");
            return answer;
        }

        let Some(oracle) = &self.oracle else {
            return UNKNOWN_ANSWER.to_string();
        };
        let Some(keyword) = self.trigger.matched(question) else {
            tracing::debug!("No FAQ match and no fallback keyword");
            return UNKNOWN_ANSWER.to_string();
        };

        tracing::info!("🔮 No FAQ match, asking {} (keyword '{keyword}')", oracle.name());
        match oracle.generate(&self.prompt.render(question)).await {
            Ok(text) => text,
            Err(FaqError::Oracle(body)) => {
                tracing::warn!("⚠️ Oracle {} failed: {body}", oracle.name());
                format!("{}{body}", self.error_prefix)
            }
            Err(e) => {
                tracing::warn!("⚠️ Oracle {} failed: {e}", oracle.name());
                format!("{}{e}", self.error_prefix)
            }
        }
    }
}
