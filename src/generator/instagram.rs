use crate::error::WorkflowError;
use crate::generator::{ContentGenerator, GeneratedContent, GenerationRequest, TemplateSet, Variant};
use std::time::Duration;

static VARIANTS: &[Variant] = &[
    Variant {
        name: "Friendly",
        sections: &[
            ("opener", "Hey {{name}}! Been enjoying your {{niche}} posts lately."),
            (
                "value",
                "We help {{niche}} accounts turn their best moments into short videos, \
                 and I think {{offer}} could be a great fit for you.",
            ),
            ("follow_up", "No pressure at all, just wanted to check if you saw my last message?"),
            ("close", "Either way, keep up the great work! {{brand}}"),
        ],
    },
    Variant {
        name: "Professional",
        sections: &[
            ("opener", "Hi {{name}}, I'm reaching out from {{brand}}."),
            (
                "value",
                "We work with brands in {{niche}} on video content. {{offer}} \
                 has helped similar accounts grow their reach.",
            ),
            ("follow_up", "Following up on my earlier note. Would a short call this week work?"),
            ("close", "Best regards,\n{{brand}}"),
        ],
    },
    Variant {
        name: "Direct",
        sections: &[
            ("opener", "{{name}}, quick question about your {{niche}} content."),
            ("value", "{{offer}}. Interested?"),
            ("follow_up", "Bumping this up. Yes or no is fine."),
            ("close", "{{brand}}"),
        ],
    },
];

static DEFAULTS: &[(&str, &str)] = &[("name", "there"), ("brand", "The Studio")];

/// Instagram outreach messages. Requires `niche` and `offer`.
pub struct InstagramDmGenerator {
    templates: TemplateSet,
}

impl InstagramDmGenerator {
    pub fn new(delay: Duration) -> Self {
        Self {
            templates: TemplateSet::new(VARIANTS, DEFAULTS, delay),
        }
    }
}

#[async_trait::async_trait]
impl ContentGenerator for InstagramDmGenerator {
    fn kind(&self) -> &'static str {
        "instagram"
    }

    fn variant_names(&self) -> Vec<&'static str> {
        self.templates.names()
    }

    fn position(&self) -> usize {
        self.templates.position()
    }

    fn resume_at(&self, index: usize) {
        self.templates.resume_at(index)
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<GeneratedContent, WorkflowError> {
        let vars = self.templates.vars(request);
        let index = self.templates.pick(request.variant, &vars)?;
        self.templates.produce(self.kind(), index, &vars).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_direct_message() {
        let generator = InstagramDmGenerator::new(Duration::ZERO);
        let request = GenerationRequest::new()
            .var("name", "Jo")
            .var("niche", "home renovation")
            .var("offer", "A free 30-second teaser edit")
            .with_variant(Some(2));

        let content = generator.generate(&request).await.unwrap();
        assert_eq!(content.variant_name, "Direct");
        assert_eq!(
            content.section("opener"),
            Some("Jo, quick question about your home renovation content.")
        );
        assert_eq!(content.section("value"), Some("A free 30-second teaser edit. Interested?"));
        assert_eq!(content.section("close"), Some("The Studio"));
    }

    #[tokio::test]
    async fn test_default_name() {
        let generator = InstagramDmGenerator::new(Duration::ZERO);
        let request = GenerationRequest::new()
            .var("niche", "fitness")
            .var("offer", "x")
            .with_variant(Some(0));
        let content = generator.generate(&request).await.unwrap();
        assert!(content.section("opener").unwrap().starts_with("Hey there!"));
    }

    #[tokio::test]
    async fn test_requires_offer() {
        let generator = InstagramDmGenerator::new(Duration::ZERO);
        let request = GenerationRequest::new().var("niche", "fitness").with_variant(Some(2));
        let err = generator.generate(&request).await.unwrap_err();
        assert_eq!(err, WorkflowError::MissingPlaceholder("offer".to_string()));
    }
}
