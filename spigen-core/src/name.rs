//! Qualified binary names and the paths derived from them.

use std::fmt;
use std::path::PathBuf;

/// A fully-qualified binary type name, e.g. `com.example.PropertyResolver`.
///
/// Names are kept in binary form: nested types use `$` in their simple
/// name, so splitting on the last `.` is always the package boundary.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QualifiedName(String);

impl QualifiedName {
    /// Wrap a qualified binary name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The full dotted name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The package portion, or the empty string for an unpackaged type.
    pub fn package(&self) -> &str {
        match self.0.rfind('.') {
            Some(idx) => &self.0[..idx],
            None => "",
        }
    }

    /// The simple type name after the last package separator.
    pub fn simple_name(&self) -> &str {
        match self.0.rfind('.') {
            Some(idx) => &self.0[idx + 1..],
            None => &self.0,
        }
    }

    /// The conventional accessor type for this contract: same package,
    /// simple name suffixed with `Factory`.
    pub fn factory_name(&self) -> QualifiedName {
        let package = self.package();
        if package.is_empty() {
            QualifiedName::new(format!("{}Factory", self.simple_name()))
        } else {
            QualifiedName::new(format!("{}.{}Factory", package, self.simple_name()))
        }
    }

    /// Relative path of the registry artifact for this contract:
    /// `META-INF/services/<qualified-name>`.
    pub fn registry_path(&self) -> PathBuf {
        PathBuf::from("META-INF").join("services").join(&self.0)
    }

    /// Relative path of a source unit for this type: package segments as
    /// directories, then `<SimpleName>.<extension>`.
    pub fn source_path(&self, extension: &str) -> PathBuf {
        let mut path = PathBuf::new();
        for segment in self.package().split('.').filter(|s| !s.is_empty()) {
            path.push(segment);
        }
        path.push(format!("{}.{}", self.simple_name(), extension));
        path
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for QualifiedName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for QualifiedName {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}
