use std::fmt;
use std::path::{Path, PathBuf};
use anyhow::Result;

use crate::file_utils::FileManager;

// @module: Raw source document handling

// @struct: Immutable ordered lines of one input file
#[derive(Debug, Clone)]
pub struct SourceDocument {
    // @field: Source filename
    source_file: PathBuf,

    // @field: Raw lines, in file order
    lines: Vec<String>,
}

impl SourceDocument {
    /// Create a document from already-loaded content
    pub fn from_string<P: AsRef<Path>>(source_file: P, content: &str) -> Self {
        SourceDocument {
            source_file: source_file.as_ref().to_path_buf(),
            lines: content.lines().map(str::to_string).collect(),
        }
    }

    /// Load a document from disk
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = FileManager::read_to_string(&path)?;
        Ok(Self::from_string(path, &content))
    }

    /// Path of the file this document was read from
    pub fn source_file(&self) -> &Path {
        &self.source_file
    }

    /// Raw lines in file order
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Iterate lines with their 1-based line numbers
    pub fn iter_numbered(&self) -> impl Iterator<Item = (usize, &str)> {
        self.lines.iter().enumerate().map(|(idx, line)| (idx + 1, line.as_str()))
    }

    /// Number of lines in the document
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the document has no lines
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Render the line-numbered echo used for the diagnostic side file
    pub fn numbered_echo(&self) -> String {
        let mut out = String::new();
        for (number, line) in self.iter_numbered() {
            out.push_str(&format!("{:4} | {}\n", number, line));
        }
        out
    }
}

impl fmt::Display for SourceDocument {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
