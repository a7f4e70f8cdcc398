//! Accessor source unit generation.
//!
//! For each contract that requested one, a single Java source unit is
//! emitted: `<Simple>Factory` in the contract's package, holding a lazily
//! resolved singleton looked up through `ServiceLoader` at class
//! initialization, first implementation wins, null when none is
//! registered.

use std::path::{Path, PathBuf};

use spigen_core::{QualifiedName, WriteResult, create_new_file};

use crate::aggregator::GenerationRequest;
use crate::builder::CodeBuilder;
use crate::diagnostic::Diagnostic;

/// Identifying name stamped into the `@Generated` annotation.
const GENERATOR_NAME: &str = "spigen";

/// ISO-8601 with numeric offset, e.g. `2026-08-25T14:03:11+0000`.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

/// A renderable accessor source unit for one contract.
#[derive(Debug, Clone)]
pub struct FactorySource {
    contract: QualifiedName,
    timestamp: String,
}

impl FactorySource {
    /// Create a source unit stamped with the current local time.
    pub fn new(contract: QualifiedName) -> Self {
        let timestamp = chrono::Local::now().format(TIMESTAMP_FORMAT).to_string();
        Self::with_timestamp(contract, timestamp)
    }

    /// Create a source unit with a fixed timestamp. Used by tests that
    /// need byte-stable output.
    pub fn with_timestamp(contract: QualifiedName, timestamp: impl Into<String>) -> Self {
        Self {
            contract,
            timestamp: timestamp.into(),
        }
    }

    /// Qualified name of the generated accessor type.
    pub fn factory_name(&self) -> QualifiedName {
        self.contract.factory_name()
    }

    /// Path of the source unit relative to the generated-sources root.
    pub fn path(&self) -> PathBuf {
        self.factory_name().source_path("java")
    }

    /// Render the source unit.
    pub fn render(&self) -> String {
        let package = self.contract.package();
        let contract = self.contract.as_str();
        let factory = self.factory_name();

        CodeBuilder::java()
            .when(!package.is_empty(), |b| {
                b.line(&format!("package {};", package)).blank()
            })
            .line("import java.util.ServiceLoader;")
            .line("import javax.annotation.Generated;")
            .blank()
            .line(&format!(
                "@Generated(value = \"{}\", date = \"{}\")",
                GENERATOR_NAME, self.timestamp
            ))
            .block(
                &format!("public class {} {{", factory.simple_name()),
                "}",
                |b| {
                    b.blank()
                        .line(&format!("private static final {} INSTANCE;", contract))
                        .blank()
                        .block("static {", "}", |b| {
                            b.line(&format!(
                                "final ServiceLoader<{}> loader = ServiceLoader.load({}.class);",
                                contract, contract
                            ))
                            .block("if (loader.iterator().hasNext()) {", "} else {", |b| {
                                b.line("INSTANCE = loader.iterator().next();")
                            })
                            .indent()
                            .line("INSTANCE = null;")
                            .dedent()
                            .line("}")
                        })
                        .blank()
                        .block(
                            &format!("public static {} getInstance() {{", contract),
                            "}",
                            |b| b.line("return INSTANCE;"),
                        )
                },
            )
            .build()
    }
}

/// Emits accessor source units under a generated-sources root.
#[derive(Debug, Clone)]
pub struct FactoryGenerator {
    sources: PathBuf,
}

impl FactoryGenerator {
    /// Create a generator writing under `sources`.
    pub fn new(sources: impl Into<PathBuf>) -> Self {
        Self {
            sources: sources.into(),
        }
    }

    /// The generated-sources root.
    pub fn sources(&self) -> &Path {
        &self.sources
    }

    /// Emit the accessor for one generation request.
    ///
    /// A duplicate generation attempt (the unit already exists) or any
    /// other write failure is reported with the contract as subject and
    /// skipped; other requests proceed.
    pub fn generate(
        &self,
        request: &GenerationRequest,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> WriteResult {
        let source = FactorySource::new(request.contract.clone());
        self.emit(&source, diagnostics)
    }

    /// Emit a prepared source unit. Split out so tests can inject a fixed
    /// timestamp.
    pub fn emit(&self, source: &FactorySource, diagnostics: &mut Vec<Diagnostic>) -> WriteResult {
        let path = self.sources.join(source.path());
        match create_new_file(&path, &source.render()) {
            Ok(()) => WriteResult::Written,
            Err(e) => {
                diagnostics.push(
                    Diagnostic::error(format!(
                        "failed to generate accessor {}: {}",
                        path.display(),
                        e
                    ))
                    .on(source.contract.as_str()),
                );
                WriteResult::Skipped
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn source() -> FactorySource {
        FactorySource::with_timestamp(
            QualifiedName::new("com.example.PropertyResolver"),
            "2026-08-25T12:00:00+0000",
        )
    }

    #[test]
    fn test_factory_path() {
        assert_eq!(
            source().path(),
            PathBuf::from("com/example/PropertyResolverFactory.java")
        );
    }

    #[test]
    fn test_render_members() {
        let rendered = source().render();

        assert!(rendered.starts_with("package com.example;\n"));
        assert!(rendered.contains("public class PropertyResolverFactory {"));
        assert!(
            rendered.contains("private static final com.example.PropertyResolver INSTANCE;")
        );
        assert!(rendered.contains(
            "ServiceLoader.load(com.example.PropertyResolver.class);"
        ));
        assert!(rendered.contains(
            "public static com.example.PropertyResolver getInstance() {"
        ));
        assert!(rendered.contains(
            "@Generated(value = \"spigen\", date = \"2026-08-25T12:00:00+0000\")"
        ));
    }

    #[test]
    fn test_render_unpackaged_contract_has_no_package_line() {
        let source =
            FactorySource::with_timestamp(QualifiedName::new("Resolver"), "2026-08-25T12:00:00+0000");
        let rendered = source.render();

        assert!(!rendered.contains("package "));
        assert!(rendered.contains("public class ResolverFactory {"));
    }

    #[test]
    fn test_emit_writes_source_unit() {
        let temp = TempDir::new().unwrap();
        let generator = FactoryGenerator::new(temp.path());

        let mut diagnostics = Vec::new();
        let result = generator.emit(&source(), &mut diagnostics);

        assert_eq!(result, WriteResult::Written);
        assert!(diagnostics.is_empty());
        assert!(
            temp.path()
                .join("com/example/PropertyResolverFactory.java")
                .exists()
        );
    }

    #[test]
    fn test_duplicate_emit_reports_and_skips() {
        let temp = TempDir::new().unwrap();
        let generator = FactoryGenerator::new(temp.path());

        let mut diagnostics = Vec::new();
        assert_eq!(
            generator.emit(&source(), &mut diagnostics),
            WriteResult::Written
        );
        assert_eq!(
            generator.emit(&source(), &mut diagnostics),
            WriteResult::Skipped
        );
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics[0].subject.as_deref(),
            Some("com.example.PropertyResolver")
        );
    }
}
