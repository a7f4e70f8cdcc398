//! Convention-based factory lookup.
//!
//! Mirrors the reflective helper on the contract side: derive the
//! factory type name (`<package>.<Simple>Factory`), resolve its accessor
//! through the active catalog, invoke it, and downcast to the contract
//! type. The active catalog is resolved in two steps: the thread-bound
//! current context if one is set, else the process-wide default.
//!
//! Any step's failure collapses into a single [`LookupError`]; an empty
//! accessor result is not a failure.

use std::any::Any;
use std::cell::RefCell;
use std::sync::{Arc, OnceLock};

use spigen_core::QualifiedName;
use thiserror::Error;

use crate::catalog::Catalog;

/// Failure while resolving a contract through its factory.
///
/// Always fatal to the calling code path: the caller has no fallback
/// implementation.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("no catalog bound to the current context and no default catalog set")]
    NoCatalog,

    #[error("factory {name} is not present in the active catalog")]
    FactoryNotFound { name: String },

    #[error("factory {name} returned an instance of an unexpected type")]
    WrongType { name: String },
}

static DEFAULT: OnceLock<Arc<Catalog>> = OnceLock::new();

thread_local! {
    static CURRENT: RefCell<Option<Arc<Catalog>>> = const { RefCell::new(None) };
}

/// Install the process-wide fallback catalog. Returns false if a default
/// was already installed; the first one wins.
pub fn set_default_catalog(catalog: Arc<Catalog>) -> bool {
    DEFAULT.set(catalog).is_ok()
}

/// Run `f` with `catalog` bound as the current context on this thread,
/// restoring the previous binding afterwards, including on unwind.
pub fn with_catalog<R>(catalog: Arc<Catalog>, f: impl FnOnce() -> R) -> R {
    struct Restore(Option<Arc<Catalog>>);

    impl Drop for Restore {
        fn drop(&mut self) {
            let previous = self.0.take();
            CURRENT.with(|current| *current.borrow_mut() = previous);
        }
    }

    let _restore = Restore(CURRENT.with(|current| current.replace(Some(catalog))));
    f()
}

fn active_catalog() -> Option<Arc<Catalog>> {
    CURRENT
        .with(|current| current.borrow().clone())
        .or_else(|| DEFAULT.get().cloned())
}

/// Resolve `contract` through its conventionally-named factory.
///
/// Returns `Ok(None)` when the factory resolved but no implementation
/// was registered at its initialization.
pub fn get_instance<T: Any + Send + Sync>(
    contract: &QualifiedName,
) -> Result<Option<Arc<T>>, LookupError> {
    let factory = contract.factory_name();
    let catalog = active_catalog().ok_or(LookupError::NoCatalog)?;
    let result = catalog
        .access(factory.as_str())
        .ok_or_else(|| LookupError::FactoryNotFound {
            name: factory.as_str().to_string(),
        })?;

    match result {
        None => Ok(None),
        Some(instance) => instance
            .downcast::<T>()
            .map(Some)
            .map_err(|_| LookupError::WrongType {
                name: factory.as_str().to_string(),
            }),
    }
}
