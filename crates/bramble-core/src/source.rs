//! Source identity and byte ranges for manifest diagnostics.
//!
//! The JSON value tree is dropped after parsing; only the source text
//! and ranges survive so warnings can be rendered later.

/// Identity of a parsed `package.json` file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Source {
    /// Canonical path used as the cache key by the outer resolver.
    pub key_path: String,
    /// Path as it should appear in diagnostics.
    pub pretty_path: String,
    /// Full textual contents of the file.
    pub contents: String,
}

impl Source {
    /// Create a source whose pretty path equals its key path.
    #[must_use]
    pub fn new(key_path: impl Into<String>, contents: impl Into<String>) -> Self {
        let key_path = key_path.into();
        Self {
            pretty_path: key_path.clone(),
            key_path,
            contents: contents.into(),
        }
    }

    /// Set the pretty path shown in diagnostics.
    #[must_use]
    pub fn with_pretty_path(mut self, pretty_path: impl Into<String>) -> Self {
        self.pretty_path = pretty_path.into();
        self
    }
}

/// Byte range within a source file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SourceRange {
    /// Byte offset of the first token.
    pub offset: u32,
    /// Length of the token in bytes.
    pub len: u32,
}

impl SourceRange {
    #[must_use]
    pub fn new(offset: u32, len: u32) -> Self {
        Self { offset, len }
    }

    /// Byte offset one past the end of the range.
    #[must_use]
    pub fn end(&self) -> u32 {
        self.offset + self.len
    }
}
