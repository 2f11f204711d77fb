//! Deliverycheck CLI entry point.

use clap::Parser;
use deliverycheck::cli::{self, Cli, EXIT_ERROR};
use deliverycheck::summary::EXIT_READY;

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version are not errors
            let code = if e.use_stderr() { EXIT_ERROR } else { EXIT_READY };
            let _ = e.print();
            std::process::exit(code);
        }
    };
    cli::init_logging(cli.verbose);

    let exit_code = match cli::run_audit(&cli) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "audit aborted");
            eprintln!("\n❌ Validation failed with error: {:#}", e);
            EXIT_ERROR
        }
    };

    std::process::exit(exit_code);
}
