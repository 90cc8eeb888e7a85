//! File-based FAQ repository.
//! The FAQ set lives in a single pretty-printed JSON file, human-readable and
//! easy to edit by hand. Saves go through a sibling temp file and a rename,
//! so readers see either the old or the new document.

use faqdesk_core::error::{FaqError, Result};
use faqdesk_core::traits::FaqRepository;
use faqdesk_core::types::Section;
use std::path::{Path, PathBuf};

/// JSON file repository.
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl FaqRepository for JsonFileRepository {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> Result<Vec<Section>> {
        if !self.path.exists() {
            tracing::info!("📄 Creating empty FAQ file at {}", self.path.display());
            self.save(&[])?;
            return Ok(Vec::new());
        }
        let json = std::fs::read_to_string(&self.path).map_err(|e| {
            FaqError::Storage(format!("Failed to read {}: {e}", self.path.display()))
        })?;
        let sections: Vec<Section> = serde_json::from_str(&json).map_err(|e| {
            FaqError::Storage(format!("Failed to parse {}: {e}", self.path.display()))
        })?;
        tracing::debug!(
            "Loaded {} sections from {}",
            sections.len(),
            self.path.display()
        );
        Ok(sections)
    }

    fn save(&self, sections: &[Section]) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                FaqError::Storage(format!("Failed to create {}: {e}", parent.display()))
            })?;
        }
        let json = serde_json::to_string_pretty(sections)
            .map_err(|e| FaqError::Storage(format!("Serialize error: {e}")))?;
        let tmp = self.temp_path();
        std::fs::write(&tmp, &json).map_err(|e| {
            FaqError::Storage(format!("Failed to write {}: {e}", tmp.display()))
        })?;
        std::fs::rename(&tmp, &self.path).map_err(|e| {
            FaqError::Storage(format!("Failed to replace {}: {e}", self.path.display()))
        })?;
        tracing::debug!("💾 Saved {} sections to {}", sections.len(), self.path.display());
        Ok(())
    }
}
