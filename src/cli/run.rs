use anyhow::Result;

use super::{
    args::{Arguments, Command},
    commands::{CommandResult, analyze::analyze, init::init},
};

pub fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Analyze(args)) => analyze(args),
        Some(Command::Init) => init(),
        None => {
            anyhow::bail!("No command provided. Use --help to see available commands.")
        }
    }
}
