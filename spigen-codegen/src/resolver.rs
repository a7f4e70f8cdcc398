//! Contract resolution and candidate validation.
//!
//! Each marked candidate either yields a (contract, implementation) pair
//! or a diagnostic. Failures never terminate the round: the candidate is
//! dropped and its siblings keep processing.

use spigen_core::QualifiedName;
use spigen_model::{SymbolModel, TypeDecl};

use crate::diagnostic::Diagnostic;

/// A validated candidate: the contract it provides and its binary name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedProvider {
    /// The contract the candidate registers against.
    pub contract: QualifiedName,
    /// Binary name of the implementation.
    pub implementation: String,
    /// Whether the candidate requested accessor generation for the
    /// contract.
    pub generate_factory: bool,
}

/// Validate one candidate and resolve its declared contract.
///
/// Returns `None` after pushing a diagnostic when the candidate is not a
/// concrete class, its marker carries no contract, or it is not
/// assignable to the declared contract.
pub fn resolve<M: SymbolModel>(
    model: &M,
    candidate: &TypeDecl,
    diagnostics: &mut Vec<Diagnostic>,
) -> Option<ResolvedProvider> {
    let marker = candidate.provider.as_ref()?;

    if !candidate.is_concrete_class() {
        diagnostics.push(
            Diagnostic::error(format!("{} must be a concrete class", candidate.name))
                .on(&candidate.name),
        );
        return None;
    }

    let Some(contract) = marker.contract.as_deref() else {
        diagnostics.push(
            Diagnostic::error("missing required contract on provider marker").on(&candidate.name),
        );
        return None;
    };

    if !model.is_assignable(&candidate.name, contract) {
        diagnostics.push(
            Diagnostic::error(format!(
                "type {} is not assignable to {}",
                candidate.name, contract
            ))
            .on(&candidate.name),
        );
        return None;
    }

    Some(ResolvedProvider {
        contract: QualifiedName::new(contract),
        implementation: candidate.name.clone(),
        generate_factory: marker.generate_factory,
    })
}
