//! Processing round orchestration.
//!
//! A round is single-threaded and holds no state beyond what it persists:
//! resolve candidates, aggregate per contract, merge with on-disk
//! artifacts, write the merged artifacts, then emit requested accessors.
//! Every failure along the way becomes a diagnostic on the outcome; no
//! failure aborts the round.

use std::path::PathBuf;

use spigen_core::WriteResult;
use spigen_model::SymbolModel;

use crate::aggregator::ServiceMap;
use crate::diagnostic::Diagnostic;
use crate::factory::FactoryGenerator;
use crate::registry::write_registry;
use crate::resolver::resolve;

/// One processing round over a symbol model.
pub struct Round<'a, M: SymbolModel> {
    model: &'a M,
    classes: PathBuf,
    sources: PathBuf,
}

/// What a round produced, including every diagnostic it collected.
#[derive(Debug, Default)]
pub struct RoundOutcome {
    /// Number of registry artifacts written.
    pub registries_written: usize,
    /// Number of accessor source units emitted.
    pub factories_generated: usize,
    /// Number of candidates that passed validation.
    pub providers_registered: usize,
    /// Diagnostics collected across all steps.
    pub diagnostics: Vec<Diagnostic>,
}

impl RoundOutcome {
    /// Whether any error diagnostic was recorded.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_error())
    }

    /// Count the number of error diagnostics.
    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity.is_error())
            .count()
    }
}

impl<'a, M: SymbolModel> Round<'a, M> {
    /// Create a round writing registry artifacts under `classes` and
    /// accessor sources under `sources`.
    pub fn new(model: &'a M, classes: impl Into<PathBuf>, sources: impl Into<PathBuf>) -> Self {
        Self {
            model,
            classes: classes.into(),
            sources: sources.into(),
        }
    }

    /// Run the round to completion.
    pub fn run(&self) -> RoundOutcome {
        let mut outcome = RoundOutcome::default();
        let map = self.aggregate(&mut outcome);

        outcome.registries_written =
            write_registry(&map, &self.classes, &mut outcome.diagnostics);

        let generator = FactoryGenerator::new(&self.sources);
        for request in map.requests() {
            if generator.generate(request, &mut outcome.diagnostics) == WriteResult::Written {
                outcome.factories_generated += 1;
            }
        }

        outcome
    }

    /// Run only the validation half of the round: resolve and aggregate
    /// without touching the filesystem.
    pub fn check(&self) -> RoundOutcome {
        let mut outcome = RoundOutcome::default();
        self.resolve_candidates(&mut outcome);
        outcome
    }

    fn aggregate(&self, outcome: &mut RoundOutcome) -> ServiceMap {
        let mut map = ServiceMap::new();
        for provider in self.resolve_candidates(outcome) {
            map.insert(provider, &mut outcome.diagnostics);
        }
        map.merge_existing(&self.classes, &mut outcome.diagnostics);
        map
    }

    fn resolve_candidates(&self, outcome: &mut RoundOutcome) -> Vec<crate::ResolvedProvider> {
        let mut resolved = Vec::new();
        for candidate in self.model.candidates() {
            if let Some(provider) = resolve(self.model, candidate, &mut outcome.diagnostics) {
                resolved.push(provider);
            }
        }
        outcome.providers_registered = resolved.len();
        resolved
    }
}
