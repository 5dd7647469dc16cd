use std::sync::Arc;

use hole_out::args::{self, CleanArgs, Command};
use hole_out::catalog::CourseCatalog;
use hole_out::controller::RoundService;
use hole_out::score::{RoundFilter, StatisticsAggregator, breakdown_by_course};
use hole_out::storage::SqliteRoundStore;
use serde::Serialize;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = args::args_checks();
    init_logging(&args.log_filter);

    let catalog = match CourseCatalog::from_path(&args.courses_path) {
        Ok(catalog) => catalog,
        Err(e) => {
            error!(path = %args.courses_path, error = %e, "cannot load course catalog");
            std::process::exit(1);
        }
    };
    let store = SqliteRoundStore::open(&args.db_name)?;
    info!(db = %args.db_name, "round store ready");
    let service = RoundService::new(Arc::new(store));

    run(&args, &catalog, &service).await
}

fn init_logging(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run(
    args: &CleanArgs,
    catalog: &CourseCatalog,
    service: &RoundService,
) -> Result<(), Box<dyn std::error::Error>> {
    match &args.command {
        Command::Courses { search } => print_json(&catalog.search_courses(search)),
        Command::Rounds { course } => {
            let rounds = match course {
                Some(id) => service.rounds_by_course(*id).await?,
                None => service.all_rounds().await?,
            };
            let summaries: Vec<_> = rounds.iter().map(|r| r.summary()).collect();
            print_json(&summaries)
        }
        Command::Round { round_id } => {
            let round = service.require_round(*round_id).await?;
            print_json(&round.summary())
        }
        Command::Stats {
            course,
            hole,
            by_course,
        } => {
            let rounds = service.all_rounds().await?;
            if *by_course {
                return print_json(&breakdown_by_course(&rounds, catalog));
            }
            let aggregator = StatisticsAggregator::new(&rounds);
            let filter = course.map_or_else(RoundFilter::career, RoundFilter::course);
            match hole {
                Some(hole_number) => print_json(&aggregator.hole_summary(filter, *hole_number)),
                None => print_json(&aggregator.summary(filter)),
            }
        }
        Command::Delete { round_id } => {
            service.delete_round(*round_id).await?;
            println!("deleted round {round_id}");
            Ok(())
        }
    }
}
