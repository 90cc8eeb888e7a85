//! Repository trait: whole-document persistence of the FAQ set.

use crate::error::Result;
use crate::types::Section;

/// Loads and saves the complete FAQ document.
///
/// There is no partial update: callers load everything, mutate in memory and
/// save everything back. Concurrent writers race and the last save wins.
pub trait FaqRepository: Send + Sync {
    /// Short label for logs (e.g. the file path).
    fn describe(&self) -> String;

    /// Read the current sections. A missing document is created empty.
    fn load(&self) -> Result<Vec<Section>>;

    /// Overwrite the document with `sections`.
    fn save(&self, sections: &[Section]) -> Result<()>;
}
