use std::collections::HashSet;

// @module: Per-file conversion state

// @struct: Mutable state for one file's conversion; discarded afterwards
#[derive(Debug, Default)]
pub struct ConversionContext {
    // @field: Source scope depth, braces counted on raw lines
    pub depth: i32,

    // @field: Whether the cursor is inside a translatable method body
    pub in_method: bool,

    // @field: Element accessor names generated so far
    pub element_accessors: HashSet<String>,

    // @field: Resolved import lines, ordered, deduplicated by exact text
    imports: Vec<String>,
}

impl ConversionContext {
    /// Fresh state for one file
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a generated element accessor name
    pub fn note_accessor(&mut self, name: &str) {
        self.element_accessors.insert(name.to_string());
    }

    /// Whether a name is a known element accessor
    pub fn is_accessor(&self, name: &str) -> bool {
        self.element_accessors.contains(name)
    }

    /// Record an import line.
    ///
    /// Deduplication is by exact string identity: two differently formatted
    /// imports of the same symbol are kept as two entries.
    pub fn note_import(&mut self, import: &str) {
        if !self.imports.iter().any(|existing| existing == import) {
            self.imports.push(import.to_string());
        }
    }

    /// Imports recorded for this file, in first-seen order
    pub fn imports(&self) -> &[String] {
        &self.imports
    }
}
