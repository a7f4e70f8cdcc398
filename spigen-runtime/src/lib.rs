//! Runtime side of the spigen service registry.
//!
//! The compile-time half writes `META-INF/services/<contract>` artifacts
//! and accessor sources; this crate is the dynamic-discovery collaborator
//! those artifacts feed. A [`Catalog`] stands in for a class-loading
//! context: a runtime symbol table mapping qualified names to
//! constructors and factory accessors. A [`Loader`] enumerates a
//! contract's registered implementations from the artifact (first match
//! or none, no ambiguity resolution), and [`lookup::get_instance`]
//! resolves a contract's accessor by convention name through the active
//! catalog.

mod catalog;
mod discovery;
pub mod lookup;
mod singleton;

pub use catalog::{Catalog, Instance};
pub use discovery::{DiscoveryError, Loader};
pub use lookup::LookupError;
pub use singleton::LazySingleton;
