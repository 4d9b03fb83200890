use crate::error::WorkflowError;
use crate::generator::{ContentGenerator, GeneratedContent, GenerationRequest, TemplateSet, Variant};
use std::time::Duration;

static VARIANTS: &[Variant] = &[
    Variant {
        name: "Weekly Digest",
        sections: &[
            ("subject", "{{brand}} Weekly: {{topic}}"),
            ("preheader", "This week's best from {{brand}}, plus a first look at {{video_title}}."),
            (
                "body",
                "Hi {{audience}},\n\n\
                 Here is what we have been working on this week. The big one is {{topic}}, \
                 and we put together a short video about it: {{video_title}}.\n\n\
                 Watch it here: {{cta_link}}\n\n\
                 As always, hit reply and tell us what you want to see next.\n\n\
                 The {{brand}} team",
            ),
        ],
    },
    Variant {
        name: "Launch Announcement",
        sections: &[
            ("subject", "It's here: {{topic}}"),
            ("preheader", "{{brand}} just launched {{topic}}. See it in action."),
            (
                "body",
                "Hi {{audience}},\n\n\
                 Today is the day. {{topic}} is live, and you are among the first to hear about it.\n\n\
                 We recorded {{video_title}} to walk you through everything it can do.\n\n\
                 Get started: {{cta_link}}\n\n\
                 Thanks for being with us from the start,\n\
                 The {{brand}} team",
            ),
        ],
    },
    Variant {
        name: "Behind the Scenes",
        sections: &[
            ("subject", "Behind the scenes of {{video_title}}"),
            ("preheader", "How {{brand}} made {{video_title}}, start to finish."),
            (
                "body",
                "Hi {{audience}},\n\n\
                 People keep asking how we make our videos, so this week we are pulling back the \
                 curtain on {{video_title}} and what it took to tell the story of {{topic}}.\n\n\
                 See the full breakdown: {{cta_link}}\n\n\
                 Talk soon,\n\
                 The {{brand}} team",
            ),
        ],
    },
];

static DEFAULTS: &[(&str, &str)] = &[
    ("brand", "The Studio"),
    ("audience", "friends"),
    ("video_title", "our latest video"),
    ("cta_link", "https://example.com/watch"),
];

/// Email newsletter drafts. Requires `topic`.
pub struct NewsletterGenerator {
    templates: TemplateSet,
}

impl NewsletterGenerator {
    pub fn new(delay: Duration) -> Self {
        Self {
            templates: TemplateSet::new(VARIANTS, DEFAULTS, delay),
        }
    }
}

#[async_trait::async_trait]
impl ContentGenerator for NewsletterGenerator {
    fn kind(&self) -> &'static str {
        "newsletter"
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
