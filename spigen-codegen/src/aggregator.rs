//! Per-contract grouping and merge with pre-existing registry artifacts.

use std::path::Path;

use indexmap::map::Entry;
use indexmap::{IndexMap, IndexSet};
use spigen_core::QualifiedName;

use crate::diagnostic::Diagnostic;
use crate::resolver::ResolvedProvider;

/// A request to generate one accessor source unit for a contract.
///
/// At most one request is enqueued per contract per round, derived from
/// the first candidate seen for that contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// The contract needing an accessor.
    pub contract: QualifiedName,
}

/// Mapping from contract name to its ordered, duplicate-free set of
/// implementation names, scoped to a single processing round.
///
/// Insertion order is discovery order; merging an existing artifact
/// appends any names not already present, so round-discovered entries
/// come first.
#[derive(Debug, Default)]
pub struct ServiceMap {
    entries: IndexMap<String, IndexSet<String>>,
    requests: Vec<GenerationRequest>,
}

impl ServiceMap {
    /// Create an empty service map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one validated provider.
    ///
    /// The first insertion for a contract creates its entry set and, when
    /// the originating candidate asked for it, enqueues the contract's
    /// single generation request. Re-inserting an implementation is a
    /// no-op. A later candidate requesting generation after the first one
    /// declined is tolerated with a warning.
    pub fn insert(&mut self, provider: ResolvedProvider, diagnostics: &mut Vec<Diagnostic>) {
        let key = provider.contract.as_str().to_string();
        match self.entries.entry(key) {
            Entry::Occupied(mut entry) => {
                if provider.generate_factory
                    && !self.requests.iter().any(|r| r.contract == provider.contract)
                {
                    diagnostics.push(
                        Diagnostic::warning(format!(
                            "generate_factory ignored; accessor generation for {} was \
                             decided by its first candidate",
                            provider.contract
                        ))
                        .on(&provider.implementation),
                    );
                }
                entry.get_mut().insert(provider.implementation);
            }
            Entry::Vacant(entry) => {
                if provider.generate_factory {
                    self.requests.push(GenerationRequest {
                        contract: provider.contract.clone(),
                    });
                }
                let mut implementations = IndexSet::new();
                implementations.insert(provider.implementation);
                entry.insert(implementations);
            }
        }
    }

    /// Union each touched contract's set with its on-disk registry
    /// artifact under `classes`.
    ///
    /// A missing artifact is empty prior state. Any other read failure is
    /// reported and that contract keeps its round-discovered entries
    /// only. Lines are taken literally; blank lines and comment-looking
    /// lines are ordinary entries.
    pub fn merge_existing(&mut self, classes: &Path, diagnostics: &mut Vec<Diagnostic>) {
        for (contract, implementations) in &mut self.entries {
            let path = classes.join(QualifiedName::new(contract.as_str()).registry_path());
            let content = match std::fs::read_to_string(&path) {
                Ok(content) => content,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
                Err(e) => {
                    diagnostics.push(
                        Diagnostic::error(format!(
                            "failed to read registry {}: {}",
                            path.display(),
                            e
                        ))
                        .on(contract.as_str()),
                    );
                    continue;
                }
            };
            for line in content.lines() {
                implementations.insert(line.to_string());
            }
        }
    }

    /// Contracts touched this round, in first-sight order.
    pub fn contracts(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// The ordered implementation set for a contract.
    pub fn implementations(&self, contract: &str) -> Option<&IndexSet<String>> {
        self.entries.get(contract)
    }

    /// Iterate (contract, implementations) pairs in first-sight order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &IndexSet<String>)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// The generation requests enqueued this round, in enqueue order.
    pub fn requests(&self) -> &[GenerationRequest] {
        &self.requests
    }

    /// Number of contracts touched this round.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no contract was touched this round.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn provider(contract: &str, implementation: &str, generate: bool) -> ResolvedProvider {
        ResolvedProvider {
            contract: QualifiedName::new(contract),
            implementation: implementation.to_string(),
            generate_factory: generate,
        }
    }

    #[test]
    fn test_groups_by_contract() {
        let mut map = ServiceMap::new();
        let mut diagnostics = Vec::new();
        map.insert(provider("a.A", "a.Impl1", false), &mut diagnostics);
        map.insert(provider("b.B", "b.Impl1", false), &mut diagnostics);
        map.insert(provider("a.A", "a.Impl2", false), &mut diagnostics);

        assert_eq!(map.len(), 2);
        assert!(diagnostics.is_empty());
        let a: Vec<_> = map.implementations("a.A").unwrap().iter().collect();
        assert_eq!(a, vec!["a.Impl1", "a.Impl2"]);
    }

    #[test]
    fn test_duplicate_implementation_ignored() {
        let mut map = ServiceMap::new();
        let mut diagnostics = Vec::new();
        map.insert(provider("a.A", "a.Impl", false), &mut diagnostics);
        map.insert(provider("a.A", "a.Impl", false), &mut diagnostics);

        assert_eq!(map.implementations("a.A").unwrap().len(), 1);
    }

    #[test]
    fn test_one_request_per_contract() {
        let mut map = ServiceMap::new();
        let mut diagnostics = Vec::new();
        map.insert(provider("a.A", "a.Impl1", true), &mut diagnostics);
        map.insert(provider("a.A", "a.Impl2", true), &mut diagnostics);
        map.insert(provider("a.A", "a.Impl3", true), &mut diagnostics);

        assert_eq!(map.requests().len(), 1);
        assert_eq!(map.requests()[0].contract.as_str(), "a.A");
        // Later flags agree with the decision, so nothing is reported
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_request_follows_first_candidate_flag() {
        // Only the first candidate for a contract decides the request
        let mut map = ServiceMap::new();
        let mut diagnostics = Vec::new();
        map.insert(provider("a.A", "a.Impl1", false), &mut diagnostics);
        map.insert(provider("a.A", "a.Impl2", true), &mut diagnostics);

        assert!(map.requests().is_empty());
    }

    #[test]
    fn test_ignored_late_generate_flag_warns() {
        let mut map = ServiceMap::new();
        let mut diagnostics = Vec::new();
        map.insert(provider("a.A", "a.Impl1", false), &mut diagnostics);
        map.insert(provider("a.A", "a.Impl2", true), &mut diagnostics);

        assert_eq!(diagnostics.len(), 1);
        assert!(!diagnostics[0].severity.is_error());
        assert!(diagnostics[0].message.contains("generate_factory ignored"));
        assert_eq!(diagnostics[0].subject.as_deref(), Some("a.Impl2"));
    }

    #[test]
    fn test_merge_appends_file_entries_after_round_entries() {
        let temp = TempDir::new().unwrap();
        let path = temp
            .path()
            .join(QualifiedName::new("a.A").registry_path());
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "a.Existing\na.Impl\n").unwrap();

        let mut map = ServiceMap::new();
        let mut diagnostics = Vec::new();
        map.insert(provider("a.A", "a.Impl", false), &mut diagnostics);
        map.insert(provider("a.A", "a.New", false), &mut diagnostics);

        map.merge_existing(temp.path(), &mut diagnostics);

        assert!(diagnostics.is_empty());
        let merged: Vec<_> = map.implementations("a.A").unwrap().iter().collect();
        assert_eq!(merged, vec!["a.Impl", "a.New", "a.Existing"]);
    }

    #[test]
    fn test_merge_missing_file_is_not_an_error() {
        let temp = TempDir::new().unwrap();
        let mut map = ServiceMap::new();
        let mut diagnostics = Vec::new();
        map.insert(provider("a.A", "a.Impl", false), &mut diagnostics);

        map.merge_existing(temp.path(), &mut diagnostics);

        assert!(diagnostics.is_empty());
        assert_eq!(map.implementations("a.A").unwrap().len(), 1);
    }

    #[test]
    fn test_merge_preserves_literal_lines() {
        let temp = TempDir::new().unwrap();
        let path = temp
            .path()
            .join(QualifiedName::new("a.A").registry_path());
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        // Blank line and a comment-looking line are ordinary entries
        std::fs::write(&path, "a.Existing\n\n# not a comment\n").unwrap();

        let mut map = ServiceMap::new();
        let mut diagnostics = Vec::new();
        map.insert(provider("a.A", "a.Impl", false), &mut diagnostics);

        map.merge_existing(temp.path(), &mut diagnostics);

        let merged: Vec<_> = map.implementations("a.A").unwrap().iter().collect();
        assert_eq!(merged, vec!["a.Impl", "a.Existing", "", "# not a comment"]);
    }

    #[test]
    fn test_merge_read_failure_reports_and_continues() {
        let temp = TempDir::new().unwrap();
        // A directory where the artifact file should be forces a read error
        let path = temp
            .path()
            .join(QualifiedName::new("a.A").registry_path());
        std::fs::create_dir_all(&path).unwrap();

        let ok_path = temp
            .path()
            .join(QualifiedName::new("b.B").registry_path());
        std::fs::create_dir_all(ok_path.parent().unwrap()).unwrap();
        std::fs::write(&ok_path, "b.Existing\n").unwrap();

        let mut map = ServiceMap::new();
        let mut diagnostics = Vec::new();
        map.insert(provider("a.A", "a.Impl", false), &mut diagnostics);
        map.insert(provider("b.B", "b.Impl", false), &mut diagnostics);

        map.merge_existing(temp.path(), &mut diagnostics);

        // a.A reported but kept its round entries; b.B merged normally
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].subject.as_deref(), Some("a.A"));
        assert_eq!(map.implementations("a.A").unwrap().len(), 1);
        let b: Vec<_> = map.implementations("b.B").unwrap().iter().collect();
        assert_eq!(b, vec!["b.Impl", "b.Existing"]);
    }
}
