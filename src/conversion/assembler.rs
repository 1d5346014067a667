// @module: Output document assembly

// @const: Imports every converted file starts from
const BASE_IMPORTS: [&str; 1] = ["import { test, expect } from '@playwright/test';"];

// @const: Indentation unit for emitted scopes
const INDENT: &str = "    ";

/// Accumulates converted lines and imports, then emits one structurally
/// closed document.
///
/// Every opened scope increments a counter and every emitted closer
/// decrements it. Assembly appends closers for any depth left open; closers
/// arriving at depth zero are dropped instead of emitted, so the output is
/// well-formed even when the input's structure could not be tracked.
#[derive(Debug)]
pub struct CodeAssembler {
    // @field: Comment lines placed above the imports
    header_comments: Vec<String>,

    // @field: Import lines, base set first, exact-string dedup
    imports: Vec<String>,

    // @field: Body lines, already indented
    lines: Vec<String>,

    // @field: Currently open scope count
    depth: i32,
}

impl Default for CodeAssembler {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeAssembler {
    /// Assembler seeded with the base import set
    pub fn new() -> Self {
        CodeAssembler {
            header_comments: Vec::new(),
            imports: BASE_IMPORTS.iter().map(|s| s.to_string()).collect(),
            lines: Vec::new(),
            depth: 0,
        }
    }

    /// Currently open scope count
    pub fn depth(&self) -> i32 {
        self.depth
    }

    /// Add a comment line above the import block
    pub fn push_header_comment(&mut self, comment: &str) {
        self.header_comments.push(format!("// {}", comment));
    }

    /// Record an import line.
    ///
    /// Deduplication is by exact string identity; differently formatted
    /// imports of the same symbol are kept as separate entries.
    pub fn add_import(&mut self, import: &str) {
        if !self.imports.iter().any(|existing| existing == import) {
            self.imports.push(import.to_string());
        }
    }

    /// Emit one line at the current depth
    pub fn push_line(&mut self, line: &str) {
        if line.is_empty() {
            self.lines.push(String::new());
            return;
        }
        self.lines.push(format!("{}{}", INDENT.repeat(self.depth.max(0) as usize), line));
    }

    /// Emit a blank separator line
    pub fn push_blank(&mut self) {
        // Collapse runs of blanks
        if !matches!(self.lines.last(), Some(last) if last.is_empty()) {
            self.lines.push(String::new());
        }
    }

    /// Emit a scope-opening line and increment the balance counter
    pub fn open_scope(&mut self, line: &str) {
        self.push_line(line);
        self.depth += 1;
    }

    /// Emit a scope closer.
    ///
    /// A closer arriving with no scope open is dropped.
    pub fn close_scope(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
            self.push_line("}");
        }
    }

    /// Produce the final document, padding any scopes still open
    pub fn assemble(&self) -> String {
        let mut out = String::new();

        for comment in &self.header_comments {
            out.push_str(comment);
            out.push('\n');
        }
        if !self.header_comments.is_empty() {
            out.push('\n');
        }

        for import in &self.imports {
            out.push_str(import);
            out.push('\n');
        }
        out.push('\n');

        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }

        // Structural repair: close whatever is still open
        for remaining in (0..self.depth.max(0)).rev() {
            out.push_str(&INDENT.repeat(remaining as usize));
            out.push_str("}\n");
        }

        out
    }
}
