mod dom;
mod error;
mod fetch;
mod model;
mod parser;
mod pipeline;

use std::time::{Duration, Instant};

use clap::{Parser, Subcommand};

use fetch::HttpSource;
use model::FinalRecord;
use parser::events::EventVocabulary;
use pipeline::ExtractOptions;

#[derive(Parser)]
#[command(name = "athlete_scraper", about = "Athlete profile → normalized PR record")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract one athlete profile (and, when resolvable, its team page)
    Extract {
        /// Profile URL on the results-hosting domain
        url: String,
        /// Emit the final record as JSON instead of the table view
        #[arg(long)]
        json: bool,
        /// Overall ceiling for the whole operation, in seconds
        #[arg(long, default_value = "60")]
        timeout_secs: u64,
        /// Per-page navigation timeout, in seconds
        #[arg(long, default_value = "20")]
        nav_timeout_secs: u64,
        /// Skip the team-page metadata stage
        #[arg(long)]
        no_team: bool,
    },
    /// List the injected event vocabulary
    Events,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();
    let vocab = EventVocabulary::default();

    match cli.command {
        Commands::Extract {
            url,
            json,
            timeout_secs,
            nav_timeout_secs,
            no_team,
        } => {
            let source = HttpSource::new()?;
            let opts = ExtractOptions {
                nav_timeout: Duration::from_secs(nav_timeout_secs),
                ceiling: Duration::from_secs(timeout_secs),
                fetch_team_page: !no_team,
            };

            let t0 = Instant::now();
            let record = pipeline::extract(&source, &url, &vocab, &opts).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&record)?);
            } else {
                print_record(&record);
            }
            eprintln!("Done in {:.1}s", t0.elapsed().as_secs_f64());
            Ok(())
        }
        Commands::Events => {
            for event in &vocab.events {
                println!("{event}");
            }
            Ok(())
        }
    }
}

fn print_record(record: &FinalRecord) {
    let a = &record.athlete;
    let school = a.school_name.as_deref().unwrap_or("(no team)");
    println!("{} {} — {}", a.first_name, a.last_name, school);

    let grad = a
        .grad_year
        .map(|y| y.to_string())
        .unwrap_or_else(|| "-".into());
    println!(
        "Gender: {} | Grad year: {} | Club: {}",
        a.gender.letter(),
        grad,
        if a.is_club { "yes" } else { "no" }
    );

    if a.prs.is_empty() {
        println!("No verified PRs.");
    } else {
        println!("\n{:<20} | {:<10} | {:<14} | Meet", "Event", "Mark", "Date");
        println!("{}", "-".repeat(64));
        for pr in &a.prs {
            println!(
                "{:<20} | {:<10} | {:<14} | {}",
                pr.event, pr.mark, pr.date, pr.meet
            );
        }
    }

    let t = &record.team;
    if t.state.is_some() || t.school_size.is_some() || t.conference.is_some() {
        let field = |v: &Option<String>| v.clone().unwrap_or_else(|| "-".into());
        println!(
            "\nTeam: {} | {} | {}",
            field(&t.state),
            field(&t.school_size),
            field(&t.conference)
        );
    }
}
