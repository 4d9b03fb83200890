use crate::error::WorkflowError;
use crate::generator::Vars;

/// Inputs for one generation
#[derive(Debug, Clone, Default)]
pub struct GenerationRequest {
    pub vars: Vars,
    /// Fixed variant; when unset the generator rotates through its variants
    pub variant: Option<usize>,
}

impl GenerationRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    pub fn with_variant(mut self, variant: Option<usize>) -> Self {
        self.variant = variant;
        self
    }
}

/// Filled-in copy, as named sections
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedContent {
    pub kind: &'static str,
    pub variant: usize,
    pub variant_name: String,
    pub sections: Vec<(String, String)>,
}

impl GeneratedContent {
    pub fn section(&self, name: &str) -> Option<&str> {
        self.sections
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, text)| text.as_str())
    }

    /// Plain-text rendering with one heading per section
    pub fn to_text(&self) -> String {
        let mut output = format!("# {} ({})\n", self.kind, self.variant_name);
        for (name, text) in &self.sections {
            output.push_str(&format!("\n## {}\n{}\n", name.replace('_', " "), text));
        }
        output
    }
}

/// Trait for template-backed copy generators
#[async_trait::async_trait]
pub trait ContentGenerator: Send + Sync {
    /// Registry name, e.g. "newsletter"
    fn kind(&self) -> &'static str;

    fn variant_names(&self) -> Vec<&'static str>;

    /// Variant the next request without a pinned variant will use
    fn position(&self) -> usize;

    /// Continue the rotation from `index` (wrapped to the variant count)
    fn resume_at(&self, index: usize);

    /// Produce copy after the generator's artificial delay
    async fn generate(&self, request: &GenerationRequest) -> Result<GeneratedContent, WorkflowError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content() -> GeneratedContent {
        GeneratedContent {
            kind: "newsletter",
            variant: 0,
            variant_name: "Weekly Digest".to_string(),
            sections: vec![
                ("subject".to_string(), "Hello".to_string()),
                ("follow_up".to_string(), "Still there?".to_string()),
            ],
        }
    }

    #[test]
    fn test_section_lookup() {
        let content = content();
        assert_eq!(content.section("subject"), Some("Hello"));
        assert_eq!(content.section("body"), None);
    }

    #[test]
    fn test_to_text() {
        let text = content().to_text();
        assert!(text.starts_with("# newsletter (Weekly Digest)"));
        assert!(text.contains("## follow up\nStill there?"));
    }

    #[test]
    fn test_request_builder() {
        let request = GenerationRequest::new().var("topic", "Launch").with_variant(Some(2));
        assert_eq!(request.vars["topic"], "Launch");
        assert_eq!(request.variant, Some(2));
    }
}
