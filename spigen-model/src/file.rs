use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::{Error, Result, SymbolSet};

/// A symbol-set file with both raw content and parsed declarations.
#[derive(Debug)]
pub struct ModelFile {
    path: PathBuf,
    content: String,
    symbols: SymbolSet,
}

impl ModelFile {
    /// Open and parse a symbol-set file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let content = std::fs::read_to_string(&path).map_err(|e| {
            Box::new(Error::Io {
                path: path.clone(),
                source: e,
            })
        })?;
        let filename = path.display().to_string();
        let symbols = parse(&content, &filename)?;

        Ok(Self {
            path,
            content,
            symbols,
        })
    }

    /// Parse a symbol set from a string, using `filename` for error
    /// reporting.
    pub fn from_str(content: &str, filename: &str) -> Result<Self> {
        let symbols = parse(content, filename)?;
        Ok(Self {
            path: PathBuf::from(filename),
            content: content.to_string(),
            symbols,
        })
    }

    /// Get the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the raw content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Get the parsed symbol set.
    pub fn symbols(&self) -> &SymbolSet {
        &self.symbols
    }
}

fn parse(content: &str, filename: &str) -> Result<SymbolSet> {
    let set: SymbolSet =
        toml::from_str(content).map_err(|e| Error::parse(e, content, filename))?;

    // Duplicate declarations would make assignability and candidate
    // iteration ambiguous
    let mut seen = HashSet::new();
    for decl in &set.types {
        if !seen.insert(decl.name.as_str()) {
            return Err(Error::duplicate_type(&decl.name, content, filename));
        }
    }

    Ok(set)
}
