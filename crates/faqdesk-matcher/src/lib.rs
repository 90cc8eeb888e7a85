//! # FAQ Desk Matcher
//!
//! Finds the stored answer whose question best resembles a free-text query.
//!
//! ## How it works
//! ```text
//! "How do I apply for a PAN card?"
//!   ↓ lowercase, strip punctuation, sort words
//! "a apply card do for how i pan"
//!   ↓ Indel similarity vs every stored question (same normalization)
//! best score 81.5 ≥ 70 → answer of "how to apply for pan card"
//! ```
//!
//! Scoring is a linear scan over all entries. FAQ sets are tens to low
//! hundreds of entries, so no index is kept.

pub mod engine;
pub mod similarity;

pub use engine::{
    BestMatch, Candidate, DEFAULT_THRESHOLD, MatchEngine, MatchOutcome, UNKNOWN_ANSWER, candidates,
};
pub use similarity::{normalize, ratio, token_sort_ratio};
