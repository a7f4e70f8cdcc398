use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use spigen_codegen::Round;
use spigen_model::ModelFile;

use super::{UnwrapOrExit, report_diagnostics};

#[derive(Args)]
pub struct CheckCommand {
    /// Path to the symbol-set file (defaults to ./providers.toml)
    #[arg(short, long, default_value = "providers.toml")]
    pub model: PathBuf,
}

impl CheckCommand {
    /// Run the check command
    pub fn run(&self) -> Result<()> {
        let model = ModelFile::open(&self.model).unwrap_or_exit();

        // Validation half of a round: nothing is written
        let round = Round::new(model.symbols(), PathBuf::new(), PathBuf::new());
        let outcome = round.check();

        let has_errors = report_diagnostics(&outcome);
        if has_errors {
            std::process::exit(1);
        }

        println!("{} valid provider(s)", outcome.providers_registered);
        Ok(())
    }
}
