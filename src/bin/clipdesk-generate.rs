use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use clipdesk::{
    config::Config,
    generator::{ai_content::to_ai_content, GeneratedContent, GenerationRequest, GeneratorRegistry},
    utils, Desk,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

#[derive(Parser)]
#[command(name = "clipdesk-generate")]
#[command(about = "Draft newsletters, YouTube metadata, Instagram DMs and video copy from templates")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct VariantArgs {
    /// Template variant by position (rotates through them when omitted)
    #[arg(long)]
    variant: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// Email newsletter draft
    Newsletter {
        #[arg(long)]
        topic: String,
        #[arg(long)]
        brand: Option<String>,
        #[arg(long)]
        audience: Option<String>,
        #[arg(long)]
        video_title: Option<String>,
        #[arg(long)]
        cta_link: Option<String>,
        #[command(flatten)]
        variant: VariantArgs,
    },
    /// YouTube title, description, tags, chapters and Shorts ideas
    Youtube {
        #[arg(long)]
        title: String,
        #[arg(long)]
        topic: Option<String>,
        #[arg(long)]
        audience: Option<String>,
        /// Comma-separated talking points
        #[arg(long)]
        points: Option<String>,
        #[command(flatten)]
        variant: VariantArgs,
    },
    /// Instagram outreach message
    Instagram {
        #[arg(long)]
        niche: String,
        #[arg(long)]
        offer: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        brand: Option<String>,
        #[command(flatten)]
        variant: VariantArgs,
    },
    /// Hook, caption, CTA and email copy for a video
    AiContent {
        /// Title to write about (taken from the video with --attach)
        #[arg(long, required_unless_present = "attach")]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        brand: Option<String>,
        /// Generate from this video and store the copy on it
        #[arg(long, value_name = "VIDEO")]
        attach: Option<String>,
        #[command(flatten)]
        variant: VariantArgs,
    },
    /// List generators and their variants
    Variants,
}

fn build_request(pairs: &[(&str, Option<&str>)], variant: &VariantArgs) -> GenerationRequest {
    pairs
        .iter()
        .filter_map(|(key, value)| value.map(|v| (*key, v)))
        .fold(GenerationRequest::new(), |request, (key, value)| request.var(key, value))
        .with_variant(variant.variant)
}

async fn run(registry: &GeneratorRegistry, kind: &str, request: &GenerationRequest) -> Result<GeneratedContent> {
    let generator = registry.get(kind)?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner:.green} {msg}")?);
    spinner.set_message(format!("Generating {}...", kind));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = generator.generate(request).await;
    spinner.finish_and_clear();
    Ok(result?)
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let config = Config::load().unwrap_or_default();
    let registry = GeneratorRegistry::from_config(&config)?;

    let content = match &cli.command {
        Commands::Newsletter {
            topic,
            brand,
            audience,
            video_title,
            cta_link,
            variant,
        } => {
            let request = build_request(
                &[
                    ("topic", Some(topic.as_str())),
                    ("brand", brand.as_deref()),
                    ("audience", audience.as_deref()),
                    ("video_title", video_title.as_deref()),
                    ("cta_link", cta_link.as_deref()),
                ],
                variant,
            );
            run(&registry, "newsletter", &request).await?
        }
        Commands::Youtube {
            title,
            topic,
            audience,
            points,
            variant,
        } => {
            let request = build_request(
                &[
                    ("title", Some(title.as_str())),
                    ("topic", topic.as_deref()),
                    ("audience", audience.as_deref()),
                    ("points", points.as_deref()),
                ],
                variant,
            );
            run(&registry, "youtube", &request).await?
        }
        Commands::Instagram {
            niche,
            offer,
            name,
            brand,
            variant,
        } => {
            let request = build_request(
                &[
                    ("niche", Some(niche.as_str())),
                    ("offer", Some(offer.as_str())),
                    ("name", name.as_deref()),
                    ("brand", brand.as_deref()),
                ],
                variant,
            );
            run(&registry, "instagram", &request).await?
        }
        Commands::AiContent {
            title,
            description,
            brand,
            attach,
            variant,
        } => match attach {
            Some(id) => {
                let mut desk = Desk::open(&config, utils::today())?;
                let video = desk.video(id)?.clone();
                let request = build_request(
                    &[
                        ("title", Some(title.as_deref().unwrap_or(&video.title))),
                        ("description", Some(description.as_deref().unwrap_or(&video.description))),
                        ("brand", brand.as_deref()),
                    ],
                    variant,
                );
                let content = run(&registry, "ai-content", &request).await?;
                desk.attach_ai_content(id, to_ai_content(&content))?;
                desk.save().context("Failed to save generated copy")?;
                println!("Attached copy to {} ({})\n", video.title, video.id);
                content
            }
            None => {
                let request = build_request(
                    &[
                        ("title", title.as_deref()),
                        ("description", description.as_deref()),
                        ("brand", brand.as_deref()),
                    ],
                    variant,
                );
                run(&registry, "ai-content", &request).await?
            }
        },
        Commands::Variants => {
            for kind in registry.kinds() {
                let generator = registry.get(kind)?;
                println!("{}", kind);
                for (index, name) in generator.variant_names().iter().enumerate() {
                    println!("  {}  {}", index, name);
                }
            }
            return Ok(());
        }
    };

    registry.save().context("Failed to save generator rotation")?;
    println!("{}", content.to_text());
    Ok(())
}
