//! Fallback gating and prompt rendering.

/// Case-insensitive substring match against a fixed keyword list.
#[derive(Debug, Clone)]
pub struct KeywordTrigger {
    keywords: Vec<String>,
}

impl KeywordTrigger {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
        }
    }

    /// First keyword contained in `text`, if any.
    pub fn matched(&self, text: &str) -> Option<&str> {
        let lower = text.to_lowercase();
        self.keywords
            .iter()
            .find(|k| lower.contains(k.as_str()))
            .map(String::as_str)
    }
}

/// Prompt with a `{question}` placeholder.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    template: String,
}

impl PromptTemplate {
    pub fn new(template: &str) -> Self {
        Self {
            template: template.to_string(),
        }
    }

    /// Substitute the user's question. A template without the placeholder
    /// gets the question appended on its own line.
    pub fn render(&self, question: &str) -> String {
        if self.template.contains("{question}") {
            self.template.replace("{question}", question)
        } else {
            format!("{}\n{question}", self.template)
        }
    }
}
