//! Runtime symbol table mapping qualified names to constructors and
//! factory accessors.

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use spigen_core::QualifiedName;

use crate::discovery::Loader;
use crate::singleton::LazySingleton;

/// A shared, type-erased service instance.
pub type Instance = Arc<dyn Any + Send + Sync>;

type Constructor = Box<dyn Fn() -> Instance + Send + Sync>;
type Accessor = Box<dyn Fn() -> Option<Instance> + Send + Sync>;

/// The runtime stand-in for a class-loading context.
///
/// Maps implementation names to constructors and factory type names to
/// singleton accessors. Catalogs are built once at startup and shared
/// immutably afterwards.
#[derive(Default)]
pub struct Catalog {
    constructors: HashMap<String, Constructor>,
    accessors: HashMap<String, Accessor>,
}

impl Catalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a constructor for an implementation name.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        constructor: impl Fn() -> Instance + Send + Sync + 'static,
    ) -> &mut Self {
        self.constructors.insert(name.into(), Box::new(constructor));
        self
    }

    /// Register an accessor under a factory type name.
    pub fn register_accessor(
        &mut self,
        factory_name: impl Into<String>,
        accessor: impl Fn() -> Option<Instance> + Send + Sync + 'static,
    ) -> &mut Self {
        self.accessors.insert(factory_name.into(), Box::new(accessor));
        self
    }

    /// Register the generated-accessor analog for a contract: a lazy
    /// singleton over registry discovery, stored under the contract's
    /// conventional factory name.
    pub fn register_factory(&mut self, contract: &QualifiedName, loader: Loader) -> &mut Self {
        let singleton = LazySingleton::new(contract.clone());
        self.register_accessor(contract.factory_name().as_str(), move || {
            singleton.get(&loader)
        })
    }

    /// Construct a new instance of a registered implementation.
    pub fn construct(&self, name: &str) -> Option<Instance> {
        self.constructors.get(name).map(|constructor| constructor())
    }

    /// Whether a constructor is registered for `name`.
    pub fn knows(&self, name: &str) -> bool {
        self.constructors.contains_key(name)
    }

    /// Invoke the accessor registered under `factory_name`, if any.
    pub fn access(&self, factory_name: &str) -> Option<Option<Instance>> {
        self.accessors.get(factory_name).map(|accessor| accessor())
    }
}

impl std::fmt::Debug for Catalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Catalog")
            .field("constructors", &self.constructors.len())
            .field("accessors", &self.accessors.len())
            .finish()
    }
}
