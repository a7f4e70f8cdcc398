// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

//! Symbol model for the spigen service registry generator.
//!
//! The host compiler's view of the compilation unit set is modeled as a
//! TOML symbol set: one `[[types]]` entry per declared type, with an
//! optional `[types.provider]` marker on types that register themselves
//! against a contract. The [`SymbolModel`] trait is the narrow adapter the
//! codegen core consumes; [`SymbolSet`] is its file-backed implementation.

mod error;
mod file;
mod model;

use serde::Deserialize;

pub use error::{Error, Result};
pub use file::ModelFile;
pub use model::SymbolModel;

/// Root schema for a symbol-set file.
#[derive(Debug, Clone, Deserialize)]
pub struct SymbolSet {
    /// Declared types visible in this processing round.
    #[serde(default)]
    pub types: Vec<TypeDecl>,
}

/// A single type declaration.
#[derive(Debug, Clone, Deserialize)]
pub struct TypeDecl {
    /// Fully-qualified binary name.
    pub name: String,

    /// Declaration kind.
    #[serde(default)]
    pub kind: TypeKind,

    /// Whether the type is abstract.
    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,

    /// Direct superclass, if any.
    #[serde(default)]
    pub extends: Option<String>,

    /// Directly implemented interfaces.
    #[serde(default)]
    pub implements: Vec<String>,

    /// Provider marker, present on candidate types.
    #[serde(default)]
    pub provider: Option<ProviderMarker>,
}

impl TypeDecl {
    /// Whether this declaration is a concrete (non-abstract) class.
    pub fn is_concrete_class(&self) -> bool {
        self.kind == TypeKind::Class && !self.is_abstract
    }
}

/// Kind of a type declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    /// A class declaration.
    Class,
    /// An interface declaration.
    Interface,
}

impl Default for TypeKind {
    fn default() -> Self {
        Self::Class
    }
}

/// The provider marker carried by candidate types.
///
/// Mirrors a marker annotation with a required contract reference and an
/// optional generate-factory flag defaulting to false.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderMarker {
    /// The contract this type provides. Absence parses but fails
    /// candidate validation.
    #[serde(default)]
    pub contract: Option<String>,

    /// Whether an accessor source unit should be generated for the
    /// contract.
    #[serde(default)]
    pub generate_factory: bool,
}
