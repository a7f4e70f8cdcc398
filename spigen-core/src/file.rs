//! File-writing primitives for generated output.
//!
//! Registry artifacts are rewritten in full on every round, while generated
//! source units must never clobber an existing file: a second creation
//! attempt for the same unit is an error the caller reports and skips.

use std::io::Write;
use std::path::Path;

use eyre::Result;

/// Result of a write operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteResult {
    /// File was written.
    Written,
    /// File was skipped.
    Skipped,
}

/// Write `content` to `path`, creating parent directories as needed.
///
/// An existing file is overwritten in full; this is never an append.
pub fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    Ok(())
}

/// Create `path` with `content`, failing if the file already exists.
///
/// Parent directories are created as needed. Used for generated source
/// units, where a duplicate creation attempt within or across rounds is
/// an error rather than a silent overwrite.
pub fn create_new_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut file = std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}
