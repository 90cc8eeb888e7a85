//! # FAQ Desk Core
//!
//! Shared building blocks for every FAQ Desk crate:
//! - `types`: sections and question/answer entries as persisted on disk
//! - `traits`: the repository and fallback-oracle seams
//! - `config`: TOML configuration with environment overrides
//! - `error`: the unified error type

pub mod config;
pub mod error;
pub mod traits;
pub mod types;

pub use config::FaqDeskConfig;
pub use error::{FaqError, Result};
pub use types::{Entry, QuestionOnly, Section, SectionQuestions};
