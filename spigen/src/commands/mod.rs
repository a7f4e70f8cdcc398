mod check;
mod completions;
mod generate;

use check::CheckCommand;
use clap::{Parser, Subcommand};
use completions::CompletionsCommand;
use eyre::Result;
use generate::GenerateCommand;

/// Extension trait for exiting on symbol-set errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for spigen_model::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "spigen")]
#[command(version)]
#[command(about = "Generate service registry artifacts from a TOML symbol set")]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Generate(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Run a processing round: write registry artifacts and accessors
    Generate(GenerateCommand),

    /// Validate a symbol set without writing anything
    Check(CheckCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}

/// Print round diagnostics to stderr, returning whether any was an error.
pub(crate) fn report_diagnostics(outcome: &spigen_codegen::RoundOutcome) -> bool {
    for diag in &outcome.diagnostics {
        match diag.severity {
            spigen_codegen::Severity::Error => eprintln!("error: {}", diag.message),
            spigen_codegen::Severity::Warning => eprintln!("warning: {}", diag.message),
        }
        if let Some(subject) = &diag.subject {
            eprintln!("  --> {}", subject);
        }
    }
    outcome.has_errors()
}
