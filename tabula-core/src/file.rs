use std::path::{Path, PathBuf};

use eyre::{Context, Result};

/// Result of a write operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteResult {
    /// File was written
    Written,
    /// File already had the same content and was left untouched
    Unchanged,
}

/// A generated file, ready to be written below an output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    path: PathBuf,
    content: String,
}

impl File {
    /// Create a new file with the given path and content
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Create a file from rendered lines.
    ///
    /// `path` is extension-less (e.g. `public/Users`); `extension` is appended.
    /// The content always ends with exactly one newline.
    pub fn from_lines(path: &str, extension: &str, lines: &[String]) -> Self {
        let mut content = lines.join("\n");
        let trimmed = content.trim_end_matches('\n').len();
        content.truncate(trimmed);
        content.push('\n');

        Self {
            path: PathBuf::from(format!("{}.{}", path, extension)),
            content,
        }
    }

    /// Get the file path relative to the output directory
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the file content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Write the file below `base`, creating parent directories as needed.
    pub fn write(&self, base: &Path) -> Result<WriteResult> {
        let path = base.join(&self.path);

        if let Ok(existing) = std::fs::read_to_string(&path)
            && existing == self.content
        {
            return Ok(WriteResult::Unchanged);
        }

        write_file(&path, &self.content)
            .wrap_err_with(|| format!("failed to write '{}'", path.display()))?;
        Ok(WriteResult::Written)
    }
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    Ok(())
}
