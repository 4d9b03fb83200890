pub mod ai_content;
pub mod instagram;
pub mod newsletter;
pub mod registry;
pub mod template;
pub mod r#trait;
pub mod youtube;

pub use ai_content::AiContentGenerator;
pub use instagram::InstagramDmGenerator;
pub use newsletter::NewsletterGenerator;
pub use registry::GeneratorRegistry;
pub use r#trait::{ContentGenerator, GeneratedContent, GenerationRequest};
pub use template::{placeholders, render, TemplateSet, Variant, Vars};
pub use youtube::YoutubeRepurposer;
