use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use clipdesk::{
    auth,
    config::Config,
    error::WorkflowError,
    models::{Role, Video, VideoStatus},
    upload::{human_size, UploadBatch, UploadLimits, UploadMetadata},
    utils, Desk,
};
use chrono::NaiveDate;
use dialoguer::{Confirm, Password};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "clipdesk")]
#[command(about = "Video review and publishing desk for admins, clients and freelancers")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in as one of the desk accounts
    Login {
        #[arg(value_name = "EMAIL")]
        email: String,
        /// Password (prompted when omitted)
        #[arg(long)]
        password: Option<String>,
    },
    /// Sign out
    Logout,
    /// Show the signed-in user
    Whoami,
    /// List the videos you can see
    List {
        /// Only videos with this status (in-progress, submitted, approved, rejected)
        #[arg(long)]
        status: Option<VideoStatus>,
    },
    /// Show one video in detail
    Show {
        #[arg(value_name = "ID")]
        id: String,
    },
    /// Upload video files or directories of videos
    Upload {
        #[arg(value_name = "PATH", required = true)]
        paths: Vec<PathBuf>,
        /// Title (single file only; defaults to the file name)
        #[arg(long)]
        title: Option<String>,
        #[arg(long, default_value = "")]
        description: String,
        /// Client the videos are for (defaults to the first client account)
        #[arg(long)]
        client: Option<String>,
        #[arg(long = "tag")]
        tags: Vec<String>,
        /// Keep the videos in progress instead of submitting them for review
        #[arg(long)]
        draft: bool,
        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Send a video for review
    Submit {
        #[arg(value_name = "ID")]
        id: String,
    },
    /// Approve a submitted video
    Approve {
        #[arg(value_name = "ID")]
        id: String,
        #[arg(long)]
        feedback: Option<String>,
    },
    /// Reject a submitted video with feedback
    Reject {
        #[arg(value_name = "ID")]
        id: String,
        #[arg(long)]
        feedback: String,
    },
    /// Move a rejected video back to in progress
    Rework {
        #[arg(value_name = "ID")]
        id: String,
    },
    /// Add a publish date to an approved video
    Schedule {
        #[arg(value_name = "ID")]
        id: String,
        #[arg(value_name = "DATE", value_parser = utils::parse_date)]
        date: NaiveDate,
    },
    /// Remove a publish date
    Unschedule {
        #[arg(value_name = "ID")]
        id: String,
        #[arg(value_name = "DATE", value_parser = utils::parse_date)]
        date: NaiveDate,
    },
    /// Move a publish date to another day
    Move {
        #[arg(value_name = "ID")]
        id: String,
        #[arg(value_name = "FROM", value_parser = utils::parse_date)]
        from: NaiveDate,
        #[arg(value_name = "TO", value_parser = utils::parse_date)]
        to: NaiveDate,
    },
    /// Summary of your videos
    Dashboard,
    /// Discard all changes and restore the demo videos
    Reset {
        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let result = run(cli).await;
    if let Err(err) = &result {
        if err
            .downcast_ref::<WorkflowError>()
            .is_some_and(WorkflowError::requires_login)
        {
            eprintln!("Hint: sign in with 'clipdesk login <email>'");
        }
    }
    result
}

async fn run(cli: Cli) -> Result<()> {
    // Load configuration (falls back to defaults if not found)
    let config = Config::load().unwrap_or_default();
    let today = utils::today();
    let mut desk = Desk::open(&config, today)?;

    match cli.command {
        Commands::Login { email, password } => {
            let password = match password {
                Some(p) => p,
                None => Password::new()
                    .with_prompt("Password")
                    .interact()
                    .context("Failed to read password")?,
            };
            let user = desk.session_mut().login(&email, &password)?;
            println!("Logged in as {} ({})", user.name, user.role);
        }
        Commands::Logout => match desk.session_mut().logout()? {
            Some(user) => println!("Logged out {}", user.email),
            None => println!("Not logged in."),
        },
        Commands::Whoami => {
            let user = desk.user()?;
            println!("{} <{}> ({})", user.name, user.email, user.role);
        }
        Commands::List { status } => {
            let videos = match status {
                Some(status) => desk.visible_with_status(status)?,
                None => desk.visible()?,
            };
            if videos.is_empty() {
                println!("No videos.");
            }
            for video in videos {
                print_row(video);
            }
        }
        Commands::Show { id } => {
            print_video(desk.video(&id)?);
        }
        Commands::Upload {
            paths,
            title,
            description,
            client,
            tags,
            draft,
            yes,
        } => {
            let uploader = desk.can_upload()?.clone();
            let client_id = match client {
                Some(id) => auth::find_by_id(&id)
                    .filter(|u| u.role == Role::Client)
                    .map(|u| u.id)
                    .with_context(|| format!("No client account with id '{}'", id))?,
                None => auth::users()
                    .into_iter()
                    .find(|u| u.role == Role::Client)
                    .map(|u| u.id)
                    .context("No client account in the directory")?,
            };

            let limits = UploadLimits::from_config(&config.upload);
            let batch = UploadBatch::collect(&paths, &limits, &desk.known_hashes())?;
            println!("{}", batch.preview());

            if batch.is_empty() {
                println!("Nothing to upload.");
                return Ok(());
            }

            if !yes {
                let proceed = Confirm::new()
                    .with_prompt("Proceed with upload?")
                    .default(false)
                    .interact()
                    .context("Failed to read user input")?;

                if !proceed {
                    println!("Cancelled.");
                    return Ok(());
                }
            }

            let metadata = UploadMetadata {
                title,
                description,
                client_id,
                tags,
                submit_for_review: !draft,
            };
            let uploaded = batch.commit(&mut desk, &uploader, &metadata, today)?;
            desk.save()?;

            println!("\nUploaded {} videos:", uploaded.len());
            for video in &uploaded {
                print_row(video);
            }
        }
        Commands::Submit { id } => {
            let video = desk.submit(&id)?;
            desk.save()?;
            println!("Submitted {} for review", video.title);
        }
        Commands::Approve { id, feedback } => {
            let video = desk.approve(&id, feedback.as_deref())?;
            desk.save()?;
            println!("Approved {}", video.title);
        }
        Commands::Reject { id, feedback } => {
            let video = desk.reject(&id, &feedback)?;
            desk.save()?;
            println!("Rejected {}", video.title);
        }
        Commands::Rework { id } => {
            let video = desk.rework(&id)?;
            desk.save()?;
            println!("{} is back in progress", video.title);
        }
        Commands::Schedule { id, date } => {
            let video = desk.schedule(&id, date)?;
            desk.save()?;
            println!("{} publishes on {}", video.title, dates(&video));
        }
        Commands::Unschedule { id, date } => {
            let video = desk.unschedule(&id, date)?;
            desk.save()?;
            println!("Removed {} from {}", video.title, utils::format_date(date));
        }
        Commands::Move { id, from, to } => {
            let video = desk.reschedule(&id, from, to)?;
            desk.save()?;
            println!("{} publishes on {}", video.title, dates(&video));
        }
        Commands::Dashboard => {
            let stats = desk.dashboard(today)?;
            let user = desk.user()?;
            println!("Dashboard for {} ({})\n", user.name, stats.role);
            println!("Total videos: {}", stats.total);
            for status in VideoStatus::ALL {
                println!("  {:<12} {}", status.as_str(), stats.count(status));
            }
            if stats.awaiting_review > 0 {
                println!("\nAwaiting review: {}", stats.awaiting_review);
            }
            if stats.needs_changes > 0 {
                println!("Needs changes: {}", stats.needs_changes);
            }
            if !stats.upcoming.is_empty() {
                println!("\nUpcoming releases:");
                for release in &stats.upcoming {
                    println!(
                        "  {}  {} ({})",
                        utils::format_date(release.date),
                        release.title,
                        release.video_id
                    );
                }
            }
            if !stats.unscheduled.is_empty() {
                println!("\nApproved but unscheduled: {}", stats.unscheduled.join(", "));
            }
        }
        Commands::Reset { yes } => {
            if !yes {
                let proceed = Confirm::new()
                    .with_prompt("Discard all changes and restore the demo videos?")
                    .default(false)
                    .interact()
                    .context("Failed to read user input")?;

                if !proceed {
                    println!("Cancelled.");
                    return Ok(());
                }
            }
            desk.reset()?;
            println!("Demo videos restored.");
        }
    }

    Ok(())
}

fn dates(video: &Video) -> String {
    if video.publish_dates.is_empty() {
        return "-".to_string();
    }
    video
        .publish_dates
        .iter()
        .map(|d| utils::format_date(*d))
        .collect::<Vec<_>>()
        .join(", ")
}

fn print_row(video: &Video) {
    println!(
        "{:<10} {:<12} {:<40} {}",
        video.id,
        video.status.as_str(),
        video.title,
        dates(video)
    );
}

fn print_video(video: &Video) {
    println!("{} ({})", video.title, video.id);
    println!("  Status:    {}", video.status);
    println!("  File:      {} ({})", video.file_name, human_size(video.file_size));
    println!("  Uploaded:  {} by {}", utils::format_date(video.upload_date), uploader_name(&video.uploaded_by));
    println!("  Client:    {}", uploader_name(&video.client_id));
    println!("  Publishes: {}", dates(video));
    if !video.tags.is_empty() {
        println!("  Tags:      {}", video.tags.join(", "));
    }
    if !video.description.is_empty() {
        println!("\n{}", video.description);
    }
    if let Some(feedback) = &video.feedback {
        println!("\nFeedback: {}", feedback);
    }
    if let Some(ai) = &video.ai_content {
        println!("\nHook:    {}", ai.hook);
        println!("Caption: {}", ai.caption);
        println!("CTA:     {}", ai.cta);
    }
}

fn uploader_name(id: &str) -> String {
    auth::find_by_id(id)
        .map(|u| u.name)
        .unwrap_or_else(|| id.to_string())
}
