//! Registry artifact serialization.
//!
//! One artifact per contract at `META-INF/services/<contract>` under the
//! class-output root: UTF-8 text, one implementation name per line,
//! newline-terminated, no header or footer. Artifacts are rewritten in
//! full, never appended.

use std::path::Path;

use spigen_core::{QualifiedName, write_file};

use crate::aggregator::ServiceMap;
use crate::diagnostic::Diagnostic;

/// Write every non-empty merged entry set to its registry artifact.
///
/// A failed write is reported with the contract as subject and the
/// remaining artifacts are still written. Returns the number of
/// artifacts written.
pub fn write_registry(
    map: &ServiceMap,
    classes: &Path,
    diagnostics: &mut Vec<Diagnostic>,
) -> usize {
    let mut written = 0;
    for (contract, implementations) in map.iter() {
        if implementations.is_empty() {
            continue;
        }
        let path = classes.join(QualifiedName::new(contract).registry_path());
        let mut content = String::new();
        for implementation in implementations {
            content.push_str(implementation);
            content.push('\n');
        }
        match write_file(&path, &content) {
            Ok(()) => written += 1,
            Err(e) => {
                diagnostics.push(
                    Diagnostic::error(format!(
                        "failed to write registry {}: {}",
                        path.display(),
                        e
                    ))
                    .on(contract),
                );
            }
        }
    }
    written
}
