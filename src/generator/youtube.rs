use crate::calendar::series_prefix;
use crate::error::WorkflowError;
use crate::generator::{ContentGenerator, GeneratedContent, GenerationRequest, TemplateSet, Variant, Vars};
use std::time::Duration;

static VARIANTS: &[Variant] = &[
    Variant {
        name: "Educational",
        sections: &[
            ("title", "{{topic}}: What Nobody Tells {{audience_title}}"),
            (
                "description",
                "In this video we break down {{topic}} step by step, based on \"{{source_title}}\".\n\n\
                 You will learn: {{point_list}}.\n\n\
                 Subscribe for more videos like this.",
            ),
            ("tags", "{{tags}}"),
            ("chapters", "{{chapters}}"),
            (
                "shorts",
                "1. The biggest mistake {{audience}} make with {{topic}}\n\
                 2. {{first_point}} in under 60 seconds\n\
                 3. One tip about {{topic}} you can use today",
            ),
        ],
    },
    Variant {
        name: "Story",
        sections: &[
            ("title", "How We Got {{topic}} Right (After Getting It Wrong)"),
            (
                "description",
                "This is the story behind \"{{source_title}}\": where we started, what went wrong, \
                 and what we would tell {{audience}} starting out today.\n\n\
                 Along the way: {{point_list}}.",
            ),
            ("tags", "{{tags}}"),
            ("chapters", "{{chapters}}"),
            (
                "shorts",
                "1. The moment everything changed\n\
                 2. What {{first_point}} taught us\n\
                 3. Before and after: {{topic}}",
            ),
        ],
    },
    Variant {
        name: "Listicle",
        sections: &[
            ("title", "{{point_count}} Things to Know About {{topic}}"),
            (
                "description",
                "{{point_count}} quick lessons on {{topic}} for {{audience}}, pulled from \"{{source_title}}\".\n\n\
                 Covered: {{point_list}}.",
            ),
            ("tags", "{{tags}}"),
            ("chapters", "{{chapters}}"),
            (
                "shorts",
                "1. Lesson one: {{first_point}}\n\
                 2. The lesson most {{audience}} skip\n\
                 3. All {{point_count}} lessons in 30 seconds",
            ),
        ],
    },
];

static DEFAULTS: &[(&str, &str)] = &[
    ("audience", "creators"),
    ("points", "The problem, The approach, The result"),
];

const MAX_TAGS: usize = 8;
const CHAPTER_SECONDS: u32 = 90;

/// Repurposes a finished video into YouTube metadata and Shorts ideas.
/// Requires `title`; `topic` defaults to the title's series prefix and
/// `points` is a comma-separated list of talking points.
pub struct YoutubeRepurposer {
    templates: TemplateSet,
}

impl YoutubeRepurposer {
    pub fn new(delay: Duration) -> Self {
        Self {
            templates: TemplateSet::new(VARIANTS, DEFAULTS, delay),
        }
    }
}

fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

fn timestamp(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Fill in the values the templates derive from `title`, `topic` and `points`
fn derive(vars: &mut Vars) -> Result<(), WorkflowError> {
    let title = vars
        .get("title")
        .cloned()
        .ok_or_else(|| WorkflowError::MissingPlaceholder("title".to_string()))?;

    let topic = vars
        .get("topic")
        .cloned()
        .unwrap_or_else(|| series_prefix(&title));

    let points: Vec<String> = vars
        .get("points")
        .map(|p| p.split(',').map(|s| s.trim().to_string()).filter(|s| !s.is_empty()).collect())
        .unwrap_or_default();

    let mut chapters = vec![format!("{} Intro", timestamp(0))];
    for (i, point) in points.iter().enumerate() {
        chapters.push(format!("{} {}", timestamp(CHAPTER_SECONDS * (i as u32 + 1)), point));
    }
    chapters.push(format!(
        "{} Wrap-up",
        timestamp(CHAPTER_SECONDS * (points.len() as u32 + 1))
    ));

    let mut tags: Vec<String> = Vec::new();
    for word in format!("{} {}", topic, title).split_whitespace() {
        let word: String = word
            .chars()
            .filter(|c| c.is_alphanumeric())
            .flat_map(char::to_lowercase)
            .collect();
        if word.len() > 2 && !tags.contains(&word) && tags.len() < MAX_TAGS {
            tags.push(word);
        }
    }

    let audience = vars.get("audience").cloned().unwrap_or_default();
    vars.insert("audience_title".to_string(), title_case(&audience));
    vars.insert("source_title".to_string(), title);
    vars.insert("topic".to_string(), topic);
    vars.insert("chapters".to_string(), chapters.join("\n"));
    vars.insert("tags".to_string(), tags.join(", "));
    vars.insert("point_count".to_string(), points.len().to_string());
    vars.insert("point_list".to_string(), points.join(", "));
    vars.insert(
        "first_point".to_string(),
        points.first().cloned().unwrap_or_else(|| "The basics".to_string()),
    );
    Ok(())
}

#[async_trait::async_trait]
impl ContentGenerator for YoutubeRepurposer {
    fn kind(&self) -> &'static str {
        "youtube"
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
        derive(&mut vars)?;
        let index = self.templates.pick(request.variant, &vars)?;
        self.templates.produce(self.kind(), index, &vars).await
    }
}
