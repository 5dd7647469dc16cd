use clap::{Parser, Subcommand};
use uuid::Uuid;

use crate::model::CourseId;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// SQLite file holding saved rounds. Created if missing.
    #[arg(
        short = 'n',
        long,
        value_name = "DATABASE_NAME",
        default_value = "hole_out.db"
    )]
    pub db_name: String,
    /// Course catalog, a json document of the form {"courses": [...]}.
    #[arg(
        short = 'c',
        long,
        value_name = "COURSES_JSON",
        default_value = "data/courses.json",
        value_parser = crate::args::validation::check_readable_file
    )]
    pub courses: String,
    /// Log filter, overridden by RUST_LOG when that is set.
    #[arg(long, value_name = "LOG_FILTER", default_value = "info")]
    pub log: String,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List courses, optionally filtered by name or address.
    Courses {
        #[arg(short, long, default_value = "")]
        search: String,
    },
    /// List saved rounds, most recent first.
    Rounds {
        #[arg(long)]
        course: Option<CourseId>,
    },
    /// Print the summary of one saved round.
    Round { round_id: Uuid },
    /// Course or career statistics.
    Stats {
        /// Restrict to one course. Without it, completed rounds everywhere are used.
        #[arg(long)]
        course: Option<CourseId>,
        /// Per-hole statistics for this hole number (needs --course).
        #[arg(long, requires = "course", value_parser = crate::args::validation::check_hole_number)]
        hole: Option<u8>,
        /// One summary per course instead of a single one.
        #[arg(long, conflicts_with_all = ["course", "hole"])]
        by_course: bool,
    },
    /// Delete a saved round and its holes.
    Delete { round_id: Uuid },
}

#[derive(Debug, Clone)]
pub struct CleanArgs {
    pub db_name: String,
    pub courses_path: String,
    pub log_filter: String,
    pub command: Command,
}
