pub mod types;
pub mod validation;

pub use types::{Args, CleanArgs, Command};

use clap::Parser;

/// Parses the command line and checks what clap cannot, exiting with a message on bad input.
#[must_use]
pub fn args_checks() -> CleanArgs {
    let args = Args::parse();
    if let Err(e) = validation::check_db_name(&args.db_name) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
    CleanArgs {
        db_name: args.db_name,
        courses_path: args.courses,
        log_filter: args.log,
        command: args.command,
    }
}
