use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for symbol-set operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(help("pass the symbol-set file with --model <path>"))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse symbol set")]
    #[diagnostic(code(spigen::parse_error))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("duplicate type declaration '{name}'")]
    #[diagnostic(
        code(spigen::duplicate_type),
        help("each qualified name may be declared at most once per symbol set")
    )]
    DuplicateType {
        #[source_code]
        src: NamedSource<String>,
        name: String,
    },
}

impl Error {
    /// Create a parse error from a toml error with source context
    pub fn parse(source: toml::de::Error, src: &str, filename: &str) -> Box<Self> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::Parse {
            src: NamedSource::new(filename, src.to_string()),
            span,
            source,
        })
    }

    /// Create a duplicate-type error with source context
    pub fn duplicate_type(name: impl Into<String>, src: &str, filename: &str) -> Box<Self> {
        Box::new(Error::DuplicateType {
            src: NamedSource::new(filename, src.to_string()),
            name: name.into(),
        })
    }
}
