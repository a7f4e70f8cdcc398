//! Registry aggregation and accessor generation for spigen.
//!
//! One processing round walks the symbol model's marked candidates,
//! validates each against its declared contract, groups implementations
//! per contract, merges with any pre-existing registry artifacts, writes
//! the merged artifacts back, and emits one accessor source unit per
//! contract that requested one.
//!
//! # Module Organization
//!
//! - [`diagnostic`] - Severity and diagnostic types collected by a round
//! - [`resolver`] - Candidate validation and contract resolution
//! - [`aggregator`] - Per-contract grouping and merge with prior state
//! - [`registry`] - Registry artifact serialization
//! - [`factory`] - Accessor source unit rendering and emission
//! - [`builder`] - Indented source text building
//! - [`round`] - Round orchestration

pub mod aggregator;
pub mod builder;
pub mod diagnostic;
pub mod factory;
pub mod registry;
pub mod resolver;
pub mod round;

pub use aggregator::{GenerationRequest, ServiceMap};
pub use builder::CodeBuilder;
pub use diagnostic::{Diagnostic, Severity};
pub use factory::{FactoryGenerator, FactorySource};
pub use resolver::{ResolvedProvider, resolve};
pub use round::{Round, RoundOutcome};
