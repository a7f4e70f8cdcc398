use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use spigen_codegen::Round;
use spigen_model::ModelFile;

use super::{UnwrapOrExit, report_diagnostics};

#[derive(Args)]
pub struct GenerateCommand {
    /// Path to the symbol-set file (defaults to ./providers.toml)
    #[arg(short, long, default_value = "providers.toml")]
    pub model: PathBuf,

    /// Class-output root holding META-INF/services registry artifacts
    #[arg(short, long, default_value = "target/classes")]
    pub classes: PathBuf,

    /// Output root for generated accessor sources
    #[arg(short, long, default_value = "target/generated-sources")]
    pub sources: PathBuf,
}

impl GenerateCommand {
    /// Run the generate command
    pub fn run(&self) -> Result<()> {
        let model = ModelFile::open(&self.model).unwrap_or_exit();

        let round = Round::new(model.symbols(), &self.classes, &self.sources);
        let outcome = round.run();

        let has_errors = report_diagnostics(&outcome);

        println!(
            "Registered {} provider(s) across {} registry artifact(s)",
            outcome.providers_registered, outcome.registries_written
        );
        if outcome.factories_generated > 0 {
            println!(
                "Generated {} accessor source(s) under {}",
                outcome.factories_generated,
                self.sources.display()
            );
        }

        if has_errors {
            std::process::exit(1);
        }
        Ok(())
    }
}
