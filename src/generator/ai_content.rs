use crate::calendar::series_prefix;
use crate::error::WorkflowError;
use crate::generator::{ContentGenerator, GeneratedContent, GenerationRequest, TemplateSet, Variant};
use crate::models::{AiContent, Video};
use std::time::Duration;

static VARIANTS: &[Variant] = &[
    Variant {
        name: "Curiosity",
        sections: &[
            ("hook", "You won't believe what happened during {{title}}..."),
            ("caption", "{{description}} Watch until the end to see how {{topic}} turned out."),
            ("cta", "Follow {{brand}} for part two."),
            (
                "email_copy",
                "Subject: What happened during {{title}}?\n\n\
                 We filmed something you need to see. {{description}}\n\n\
                 Watch now and find out how {{topic}} turned out.",
            ),
        ],
    },
    Variant {
        name: "Benefit",
        sections: &[
            ("hook", "Here is how {{topic}} can save you time and money."),
            ("caption", "{{description}} Save this for later."),
            ("cta", "Send {{brand}} a message to get started."),
            (
                "email_copy",
                "Subject: {{topic}}, done right\n\n\
                 {{description}}\n\n\
                 Our new video, {{title}}, shows exactly how. Reply to this email with any questions.",
            ),
        ],
    },
    Variant {
        name: "Social Proof",
        sections: &[
            ("hook", "Our clients keep asking about {{topic}}. Here's why."),
            ("caption", "{{description}} Real project, real results."),
            ("cta", "Tag someone who needs to see {{title}}."),
            (
                "email_copy",
                "Subject: Why everyone is talking about {{topic}}\n\n\
                 {{description}}\n\n\
                 See the results for yourself in {{title}}. {{brand}}",
            ),
        ],
    },
];

static DEFAULTS: &[(&str, &str)] = &[
    ("brand", "The Studio"),
    ("description", "Here's a look behind the scenes."),
];

/// Hook, caption, CTA and email copy for a single video. Requires `title`;
/// `topic` defaults to the title's series prefix.
pub struct AiContentGenerator {
    templates: TemplateSet,
}

impl AiContentGenerator {
    pub fn new(delay: Duration) -> Self {
        Self {
            templates: TemplateSet::new(VARIANTS, DEFAULTS, delay),
        }
    }

    /// Generate copy from a video's title and description
    pub async fn generate_for(&self, video: &Video, variant: Option<usize>) -> Result<AiContent, WorkflowError> {
        let request = GenerationRequest::new()
            .var("title", video.title.as_str())
            .var("description", video.description.as_str())
            .with_variant(variant);
        let content = self.generate(&request).await?;
        Ok(to_ai_content(&content))
    }
}

/// Map generated sections onto the fields stored with a video
pub fn to_ai_content(content: &GeneratedContent) -> AiContent {
    let field = |name: &str| content.section(name).unwrap_or_default().to_string();
    AiContent {
        hook: field("hook"),
        caption: field("caption"),
        cta: field("cta"),
        email_copy: field("email_copy"),
    }
}

#[async_trait::async_trait]
impl ContentGenerator for AiContentGenerator {
    fn kind(&self) -> &'static str {
        "ai-content"
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
        let mut vars = self.templates.vars(request);
        let title = vars
            .get("title")
            .cloned()
            .ok_or_else(|| WorkflowError::MissingPlaceholder("title".to_string()))?;
        vars.entry("topic".to_string())
            .or_insert_with(|| series_prefix(&title));
        let index = self.templates.pick(request.variant, &vars)?;
        self.templates.produce(self.kind(), index, &vars).await
    }
}
