//! In-process repository for tests and throwaway runs.

use faqdesk_core::error::Result;
use faqdesk_core::traits::FaqRepository;
use faqdesk_core::types::Section;
use std::sync::Mutex;

#[derive(Default)]
pub struct MemoryRepository {
    sections: Mutex<Vec<Section>>,
}

impl MemoryRepository {
    pub fn new(sections: Vec<Section>) -> Self {
        Self {
            sections: Mutex::new(sections),
        }
    }
}

impl FaqRepository for MemoryRepository {
    fn describe(&self) -> String {
        "memory".into()
    }

    fn load(&self) -> Result<Vec<Section>> {
        Ok(self
            .sections
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone())
    }

    fn save(&self, sections: &[Section]) -> Result<()> {
        *self
            .sections
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = sections.to_vec();
        Ok(())
    }
}
