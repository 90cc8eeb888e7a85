//! Best-match selection over the flattened FAQ set.

use faqdesk_core::types::Section;

use crate::similarity::token_sort_ratio;

/// Answer returned when nothing clears the threshold.
pub const UNKNOWN_ANSWER: &str = "Sorry, I don't know the answer to that.";

/// Default minimum score for a match.
pub const DEFAULT_THRESHOLD: f64 = 70.0;

/// One searchable question/answer pair, borrowed from the store snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate<'a> {
    pub question: &'a str,
    pub answer: &'a str,
}

/// Flatten sections into candidates, section order first, then entry order.
pub fn candidates(sections: &[Section]) -> Vec<Candidate<'_>> {
    sections
        .iter()
        .flat_map(|s| s.entries.iter())
        .map(|e| Candidate {
            question: &e.question,
            answer: &e.answer,
        })
        .collect()
}

/// Highest-scoring candidate, whether or not it clears the threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BestMatch<'a> {
    pub candidate: Candidate<'a>,
    pub score: f64,
    /// Position in the flattened candidate list.
    pub position: usize,
}

/// Result of a lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchOutcome {
    Found {
        answer: String,
        question: String,
        score: f64,
    },
    Unknown,
}

impl MatchOutcome {
    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }

    /// The matched answer, or the sentinel text.
    pub fn into_answer(self) -> String {
        match self {
            Self::Found { answer, .. } => answer,
            Self::Unknown => UNKNOWN_ANSWER.to_string(),
        }
    }
}

/// Fuzzy FAQ lookup. Read-only: works on whatever snapshot it is handed.
#[derive(Debug, Clone, Copy)]
pub struct MatchEngine {
    threshold: f64,
}

impl Default for MatchEngine {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}

impl MatchEngine {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// Score `query` against every candidate and keep the first maximum.
    pub fn best_match<'a>(&self, query: &str, candidates: &[Candidate<'a>]) -> Option<BestMatch<'a>> {
        let mut best: Option<BestMatch<'a>> = None;
        for (position, candidate) in candidates.iter().enumerate() {
            let score = token_sort_ratio(query, candidate.question);
            // Strictly greater: ties keep the earlier candidate
            if best.is_none_or(|b| score > b.score) {
                best = Some(BestMatch {
                    candidate: *candidate,
                    score,
                    position,
                });
            }
        }
        best
    }

    /// Look `query` up in `sections`.
    pub fn lookup(&self, query: &str, sections: &[Section]) -> MatchOutcome {
        let pool = candidates(sections);
        let Some(best) = self.best_match(query, &pool) else {
            tracing::debug!("No FAQ entries to match against");
            return MatchOutcome::Unknown;
        };
        if best.score >= self.threshold {
            tracing::debug!(
                "FAQ match #{} '{}' (score {:.1})",
                best.position,
                best.candidate.question,
                best.score
            );
            MatchOutcome::Found {
                answer: best.candidate.answer.to_string(),
                question: best.candidate.question.to_string(),
                score: best.score,
            }
        } else {
            tracing::debug!(
                "Best FAQ score {:.1} below threshold {:.1}",
                best.score,
                self.threshold
            );
            MatchOutcome::Unknown
        }
    }

    /// Matched answer text or [`UNKNOWN_ANSWER`].
    pub fn find_answer(&self, query: &str, sections: &[Section]) -> String {
        self.lookup(query, sections).into_answer()
    }
}
