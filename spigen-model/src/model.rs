//! The narrow adapter over compile-time declarations.

use std::collections::HashSet;

use crate::{SymbolSet, TypeDecl};

/// Read-only view over the declarations visible in a processing round.
///
/// The codegen core only consumes this trait; any backing store that can
/// enumerate marked candidates and answer assignability queries can drive
/// a round.
pub trait SymbolModel {
    /// All types carrying the provider marker, in declaration order.
    fn candidates(&self) -> Vec<&TypeDecl>;

    /// Look up a declaration by qualified name.
    fn lookup(&self, name: &str) -> Option<&TypeDecl>;

    /// Whether `implementation` is assignable to `contract`: equal to it,
    /// or reachable through its `extends`/`implements` closure.
    fn is_assignable(&self, implementation: &str, contract: &str) -> bool;
}

impl SymbolModel for SymbolSet {
    fn candidates(&self) -> Vec<&TypeDecl> {
        self.types.iter().filter(|t| t.provider.is_some()).collect()
    }

    fn lookup(&self, name: &str) -> Option<&TypeDecl> {
        self.types.iter().find(|t| t.name == name)
    }

    fn is_assignable(&self, implementation: &str, contract: &str) -> bool {
        if implementation == contract {
            return true;
        }

        // Worklist over the declared supertype closure. Supertypes not
        // declared in the set are leaves: they match by name only.
        let mut visited = HashSet::new();
        let mut pending = vec![implementation];
        while let Some(name) = pending.pop() {
            if !visited.insert(name) {
                continue;
            }
            if name == contract {
                return true;
            }
            if let Some(decl) = self.lookup(name) {
                if let Some(parent) = &decl.extends {
                    pending.push(parent);
                }
                for interface in &decl.implements {
                    pending.push(interface);
                }
            }
        }
        false
    }
}
