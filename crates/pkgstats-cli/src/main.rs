use pkgstats_core::logging;

mod cli;

use crate::cli::Cli;

fn main() {
    // Initialize logging as early as possible.
    if logging::init_logging().is_err() {
        logging::init_logging_stderr();
    }

    // Parse CLI and dispatch.
    if let Err(err) = Cli::run_from_args() {
        tracing::error!("{:#}", err);
        eprintln!("pkgstats error: {:#}", err);
        eprintln!("{}", cli::diagnostic::explain(&err));
        std::process::exit(1);
    }
}
