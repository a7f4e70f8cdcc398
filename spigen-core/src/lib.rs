//! Core utilities for the spigen service registry generator.
//!
//! This crate provides the file-writing primitives and qualified-name
//! handling shared by the codegen and runtime crates.

mod file;
mod name;

pub use file::{WriteResult, create_new_file, write_file};
pub use name::QualifiedName;
