//! Registry-artifact-backed service discovery.

use std::path::PathBuf;
use std::sync::Arc;

use spigen_core::QualifiedName;
use thiserror::Error;

use crate::catalog::{Catalog, Instance};

/// Failure while enumerating or instantiating registered implementations.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("failed to read registry for {contract}")]
    Read {
        contract: String,
        #[source]
        source: std::io::Error,
    },

    #[error("no constructor registered for implementation {name}")]
    UnknownImplementation { name: String },
}

/// Enumerates a contract's registered implementations from its registry
/// artifact and instantiates them through a catalog.
///
/// Every enumeration re-reads the artifact, so the sequence is
/// restartable: registrations appearing between calls are picked up.
#[derive(Debug, Clone)]
pub struct Loader {
    classes: PathBuf,
    catalog: Arc<Catalog>,
}

impl Loader {
    /// Create a loader over the class-output root `classes`.
    pub fn new(classes: impl Into<PathBuf>, catalog: Arc<Catalog>) -> Self {
        Self {
            classes: classes.into(),
            catalog,
        }
    }

    /// Implementation names registered for `contract`, in artifact
    /// order. A missing artifact yields an empty sequence.
    pub fn names(&self, contract: &QualifiedName) -> Result<Vec<String>, DiscoveryError> {
        let path = self.classes.join(contract.registry_path());
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(DiscoveryError::Read {
                    contract: contract.as_str().to_string(),
                    source: e,
                });
            }
        };
        Ok(content.lines().map(str::to_string).collect())
    }

    /// Lazily instantiate each registered implementation in order.
    pub fn instances(
        &self,
        contract: &QualifiedName,
    ) -> Result<impl Iterator<Item = Result<Instance, DiscoveryError>> + '_, DiscoveryError> {
        let names = self.names(contract)?;
        let catalog = Arc::clone(&self.catalog);
        Ok(names.into_iter().map(move |name| {
            catalog
                .construct(&name)
                .ok_or(DiscoveryError::UnknownImplementation { name })
        }))
    }

    /// The selection policy used by generated accessors: the first
    /// registered implementation, or none.
    pub fn first_instance(
        &self,
        contract: &QualifiedName,
    ) -> Result<Option<Instance>, DiscoveryError> {
        match self.instances(contract)?.next() {
            Some(instance) => Ok(Some(instance?)),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn write_artifact(root: &std::path::Path, contract: &str, content: &str) {
        let path = root.join(QualifiedName::new(contract).registry_path());
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    fn catalog() -> Arc<Catalog> {
        let mut catalog = Catalog::new();
        catalog.register("com.example.A", || Arc::new("A".to_string()) as Instance);
        catalog.register("com.example.B", || Arc::new("B".to_string()) as Instance);
        Arc::new(catalog)
    }

    #[test]
    fn test_names_in_artifact_order() {
        let temp = TempDir::new().unwrap();
        write_artifact(temp.path(), "com.example.Resolver", "com.example.B\ncom.example.A\n");

        let loader = Loader::new(temp.path(), catalog());
        let names = loader
            .names(&QualifiedName::new("com.example.Resolver"))
            .unwrap();

        assert_eq!(names, vec!["com.example.B", "com.example.A"]);
    }

    #[test]
    fn test_missing_artifact_is_empty() {
        let temp = TempDir::new().unwrap();
        let loader = Loader::new(temp.path(), catalog());
        let contract = QualifiedName::new("com.example.Resolver");

        assert!(loader.names(&contract).unwrap().is_empty());
        assert!(loader.first_instance(&contract).unwrap().is_none());
    }

    #[test]
    fn test_first_instance_takes_first_registered() {
        let temp = TempDir::new().unwrap();
        write_artifact(temp.path(), "com.example.Resolver", "com.example.B\ncom.example.A\n");

        let loader = Loader::new(temp.path(), catalog());
        let instance = loader
            .first_instance(&QualifiedName::new("com.example.Resolver"))
            .unwrap()
            .unwrap();

        assert_eq!(*instance.downcast::<String>().unwrap(), "B");
    }

    #[test]
    fn test_enumeration_is_restartable() {
        let temp = TempDir::new().unwrap();
        let contract = QualifiedName::new("com.example.Resolver");
        write_artifact(temp.path(), "com.example.Resolver", "com.example.A\n");

        let loader = Loader::new(temp.path(), catalog());
        assert_eq!(loader.names(&contract).unwrap().len(), 1);

        // A registration appearing later is visible on the next pass
        write_artifact(
            temp.path(),
            "com.example.Resolver",
            "com.example.A\ncom.example.B\n",
        );
        assert_eq!(loader.names(&contract).unwrap().len(), 2);
    }

    #[test]
    fn test_unknown_implementation_is_an_error() {
        let temp = TempDir::new().unwrap();
        write_artifact(temp.path(), "com.example.Resolver", "com.example.Missing\n");

        let loader = Loader::new(temp.path(), catalog());
        let result = loader.first_instance(&QualifiedName::new("com.example.Resolver"));

        assert!(matches!(
            result,
            Err(DiscoveryError::UnknownImplementation { .. })
        ));
    }
}
