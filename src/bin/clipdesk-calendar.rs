use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use clap::Parser;
use clipdesk::{
    calendar::{export_csv, CalendarView, DayCell, Grouping, ViewMode, WeekStart},
    config::Config,
    utils, Desk,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "clipdesk-calendar")]
#[command(about = "Show scheduled videos as a two-week or month calendar")]
#[command(version)]
struct Cli {
    /// Calendar width (overrides config)
    #[arg(long, value_enum)]
    view: Option<ViewMode>,

    /// Day the window is built around (defaults to today)
    #[arg(long, value_parser = utils::parse_date)]
    anchor: Option<NaiveDate>,

    /// Pages to move forward (or back, when negative) from the anchor
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    offset: i32,

    /// First day of the week (overrides config)
    #[arg(long, value_enum)]
    week_start: Option<WeekStart>,

    /// Group videos that share a series title into one event
    #[arg(long)]
    projects: bool,

    /// Also write the visible events to a CSV file
    #[arg(long, value_name = "FILE")]
    csv: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let config = Config::load().unwrap_or_default();
    let today = utils::today();
    let desk = Desk::open(&config, today)?;

    let mut view = CalendarView::new(
        cli.anchor.unwrap_or(today),
        cli.view.unwrap_or(config.calendar.default_view),
        cli.week_start.unwrap_or(config.calendar.week_start),
    );
    view.shift(cli.offset);

    let grouping = if cli.projects {
        Grouping::ByProject
    } else {
        Grouping::ByDate
    };

    let visible = desk.visible()?;
    let grid = view.grid(visible.iter().copied(), grouping, today);

    println!("{}\n", view.title());
    print_grid(&grid);
    println!();
    print_agenda(&grid);

    if let Some(path) = cli.csv {
        let events = view.events(visible.iter().copied(), grouping);
        let rows = export_csv(&events, &path)?;
        println!("\nWrote {} rows to {}", rows, path.display());
    }

    Ok(())
}

/// Day numbers in rows of seven. `*` marks today, `+` a day with events and
/// parentheses a day outside the focus month.
fn print_grid(grid: &[DayCell]) {
    let header: Vec<String> = grid
        .iter()
        .take(7)
        .map(|cell| format!("{:^6}", cell.date.format("%a").to_string()))
        .collect();
    println!("{}", header.join(""));

    for week in grid.chunks(7) {
        let row: Vec<String> = week
            .iter()
            .map(|cell| {
                let marker = if cell.is_today {
                    "*"
                } else if !cell.events.is_empty() {
                    "+"
                } else {
                    " "
                };
                let day = if cell.in_focus_month {
                    format!("{:>2}{}", cell.date.day(), marker)
                } else {
                    format!("({}){}", cell.date.day(), marker)
                };
                format!("{:^6}", day)
            })
            .collect();
        println!("{}", row.join(""));
    }
}

fn print_agenda(grid: &[DayCell]) {
    let mut empty = true;
    for cell in grid.iter().filter(|c| !c.events.is_empty()) {
        empty = false;
        for event in &cell.events {
            let ids: Vec<&str> = event.videos.iter().map(|v| v.id.as_str()).collect();
            println!("{}  {} ({})", cell.date.format("%Y-%m-%d %a"), event.title, ids.join(", "));
        }
    }
    if empty {
        println!("Nothing scheduled in this window.");
    }
}
