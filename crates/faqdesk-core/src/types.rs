//! FAQ document types.
//!
//! The persisted document is an ordered array of
//! `{ "section": ..., "faqs": [{ "id", "question", "answer" }] }`.
//! `id` is optional. Entries loaded without one keep an empty id and are
//! written back without the key, so a hand-written document round-trips
//! unchanged. Such entries are addressed by position instead.

use serde::{Deserialize, Serialize};

/// A single question/answer pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Stable identifier, independent of the entry's position. Empty for
    /// entries from documents that predate ids.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub question: String,
    pub answer: String,
}

impl Entry {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            question: question.into(),
            answer: answer.into(),
        }
    }

    pub fn has_id(&self) -> bool {
        !self.id.is_empty()
    }
}

/// A named group of entries. Names are not required to be unique;
/// lookups by name always resolve to the first section carrying it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    #[serde(rename = "section")]
    pub name: String,
    #[serde(rename = "faqs", default)]
    pub entries: Vec<Entry>,
}

impl Section {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }
}

/// Public view of a section: questions only, answers withheld.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionQuestions {
    pub section: String,
    pub faqs: Vec<QuestionOnly>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionOnly {
    pub question: String,
}

impl From<&Section> for SectionQuestions {
    fn from(section: &Section) -> Self {
        Self {
            section: section.name.clone(),
            faqs: section
                .entries
                .iter()
                .map(|e| QuestionOnly {
                    question: e.question.clone(),
                })
                .collect(),
        }
    }
}
