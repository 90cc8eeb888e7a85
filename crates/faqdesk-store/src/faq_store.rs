//! Admin-facing FAQ operations over a repository.

use faqdesk_core::error::Result;
use faqdesk_core::traits::FaqRepository;
use faqdesk_core::types::{Entry, Section, SectionQuestions};
use std::sync::Arc;

/// Load, mutate and save the FAQ set.
///
/// Misses (unknown section, out-of-range index, unknown id) are silent no-ops
/// and nothing is written. The admin page always addresses entries it has
/// just rendered, so a miss only happens when a concurrent edit got there
/// first.
#[derive(Clone)]
pub struct FaqStore {
    repo: Arc<dyn FaqRepository>,
}

impl FaqStore {
    pub fn new(repo: Arc<dyn FaqRepository>) -> Self {
        Self { repo }
    }

    /// Label of the backing repository.
    pub fn describe(&self) -> String {
        self.repo.describe()
    }

    /// Current content of the store.
    pub fn sections(&self) -> Result<Vec<Section>> {
        self.repo.load()
    }

    /// Sections with their questions only.
    pub fn question_index(&self) -> Result<Vec<SectionQuestions>> {
        Ok(self.repo.load()?.iter().map(SectionQuestions::from).collect())
    }

    /// Append an entry to `section`, creating the section at the end if absent.
    /// Returns the new entry's id.
    pub fn add_entry(&self, section: &str, question: &str, answer: &str) -> Result<String> {
        let mut sections = self.repo.load()?;
        let entry = Entry::new(question, answer);
        let id = entry.id.clone();
        match sections.iter_mut().find(|s| s.name == section) {
            Some(existing) => existing.entries.push(entry),
            None => {
                tracing::info!("📂 New section '{section}'");
                let mut created = Section::new(section);
                created.entries.push(entry);
                sections.push(created);
            }
        }
        self.repo.save(&sections)?;
        tracing::info!("➕ Added FAQ {id} to '{section}'");
        Ok(id)
    }

    /// Replace the entry at `index` in the first section named `section`.
    /// The entry keeps its id. Returns whether anything changed.
    pub fn edit_entry(
        &self,
        section: &str,
        index: usize,
        question: &str,
        answer: &str,
    ) -> Result<bool> {
        let mut sections = self.repo.load()?;
        let Some(entry) = sections
            .iter_mut()
            .find(|s| s.name == section)
            .and_then(|s| s.entries.get_mut(index))
        else {
            tracing::debug!("edit ignored: no entry {index} in '{section}'");
            return Ok(false);
        };
        entry.question = question.to_string();
        entry.answer = answer.to_string();
        self.repo.save(&sections)?;
        tracing::info!("✏️ Edited FAQ {index} in '{section}'");
        Ok(true)
    }

    /// Remove the entry at `index` in the first section named `section`.
    pub fn delete_entry(&self, section: &str, index: usize) -> Result<bool> {
        let mut sections = self.repo.load()?;
        let Some(target) = sections
            .iter_mut()
            .find(|s| s.name == section)
            .filter(|s| index < s.entries.len())
        else {
            tracing::debug!("delete ignored: no entry {index} in '{section}'");
            return Ok(false);
        };
        target.entries.remove(index);
        self.repo.save(&sections)?;
        tracing::info!("🗑️ Deleted FAQ {index} from '{section}'");
        Ok(true)
    }

    /// Replace question and answer of the entry with `id`. Entries without
    /// an id are never matched.
    pub fn edit_entry_by_id(&self, id: &str, question: &str, answer: &str) -> Result<bool> {
        if id.is_empty() {
            return Ok(false);
        }
        let mut sections = self.repo.load()?;
        let Some(entry) = sections
            .iter_mut()
            .flat_map(|s| s.entries.iter_mut())
            .find(|e| e.id == id)
        else {
            tracing::debug!("edit ignored: unknown FAQ id {id}");
            return Ok(false);
        };
        entry.question = question.to_string();
        entry.answer = answer.to_string();
        self.repo.save(&sections)?;
        tracing::info!("✏️ Edited FAQ {id}");
        Ok(true)
    }

    /// Remove the entry with `id`.
    pub fn delete_entry_by_id(&self, id: &str) -> Result<bool> {
        if id.is_empty() {
            return Ok(false);
        }
        let mut sections = self.repo.load()?;
        let location = sections.iter().enumerate().find_map(|(si, s)| {
            s.entries.iter().position(|e| e.id == id).map(|ei| (si, ei))
        });
        let Some((si, ei)) = location else {
            tracing::debug!("delete ignored: unknown FAQ id {id}");
            return Ok(false);
        };
        sections[si].entries.remove(ei);
        self.repo.save(&sections)?;
        tracing::info!("🗑️ Deleted FAQ {id}");
        Ok(true)
    }
}
