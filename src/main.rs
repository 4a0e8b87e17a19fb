use std::process::ExitCode;

use clap::Parser;
use uigraph::cli::{Arguments, ExitStatus, logger::init_logger};

fn main() -> ExitCode {
    let args = Arguments::parse();
    init_logger(args.verbose(), args.quiet());

    match uigraph::cli::run_cli(args) {
        Ok(status) => status.into(),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitStatus::Error.into()
        }
    }
}
