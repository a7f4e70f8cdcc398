//! Lazy singleton resolution, mirroring the generated accessor's
//! static-initializer contract.

use std::sync::OnceLock;

use spigen_core::QualifiedName;

use crate::catalog::Instance;
use crate::discovery::Loader;

/// Resolves a contract's singleton exactly once: the first registered
/// implementation, or none. Repeated gets return the same instance and
/// never re-run discovery, even if the registry changes underneath.
///
/// A discovery failure during the initial resolution settles the cell as
/// empty.
#[derive(Debug)]
pub struct LazySingleton {
    contract: QualifiedName,
    cell: OnceLock<Option<Instance>>,
}

impl LazySingleton {
    /// Create an unresolved singleton for `contract`.
    pub fn new(contract: QualifiedName) -> Self {
        Self {
            contract,
            cell: OnceLock::new(),
        }
    }

    /// The contract this singleton resolves.
    pub fn contract(&self) -> &QualifiedName {
        &self.contract
    }

    /// Resolve on first call, then return the cached instance.
    pub fn get(&self, loader: &Loader) -> Option<Instance> {
        self.cell
            .get_or_init(|| loader.first_instance(&self.contract).unwrap_or(None))
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tempfile::TempDir;

    use super::*;
    use crate::catalog::Catalog;

    fn write_artifact(root: &std::path::Path, contract: &str, content: &str) {
        let path = root.join(QualifiedName::new(contract).registry_path());
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    fn loader(root: &std::path::Path) -> Loader {
        let mut catalog = Catalog::new();
        catalog.register("com.example.A", || Arc::new("A".to_string()) as Instance);
        catalog.register("com.example.B", || Arc::new("B".to_string()) as Instance);
        Loader::new(root, Arc::new(catalog))
    }

    #[test]
    fn test_repeated_gets_return_same_instance() {
        let temp = TempDir::new().unwrap();
        write_artifact(temp.path(), "com.example.Resolver", "com.example.A\n");

        let loader = loader(temp.path());
        let singleton = LazySingleton::new(QualifiedName::new("com.example.Resolver"));

        let first = singleton.get(&loader).unwrap();
        let second = singleton.get(&loader).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_no_re_discovery_after_resolution() {
        let temp = TempDir::new().unwrap();
        write_artifact(temp.path(), "com.example.Resolver", "com.example.A\n");

        let loader = loader(temp.path());
        let singleton = LazySingleton::new(QualifiedName::new("com.example.Resolver"));
        let first = singleton.get(&loader).unwrap();

        // The registry changing afterwards must not change the instance
        write_artifact(temp.path(), "com.example.Resolver", "com.example.B\n");
        let second = singleton.get(&loader).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(*second.downcast::<String>().unwrap(), "A");
    }

    #[test]
    fn test_empty_registry_resolves_to_none() {
        let temp = TempDir::new().unwrap();
        let loader = loader(temp.path());
        let singleton = LazySingleton::new(QualifiedName::new("com.example.Resolver"));

        assert!(singleton.get(&loader).is_none());

        // Still none even after a registration appears: resolved once
        write_artifact(temp.path(), "com.example.Resolver", "com.example.A\n");
        assert!(singleton.get(&loader).is_none());
    }
}
