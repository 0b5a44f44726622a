//! G-code file content.
//!
//! This module provides the GCode type holding a sliced G-code file and the
//! conversion between the whole file and the per-layer blocks that
//! post-processing passes work on.

use crate::Result;
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Comment that starts every printed layer.
pub const LAYER_KEYWORD: &str = ";LAYER:";

/// Sliced G-code.
///
/// Splitting into layers puts a boundary before every `;LAYER:` line; any
/// text before the first layer (start G-code, header) forms the first block.
/// Joining the blocks with line breaks restores the original text exactly.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct GCode {
    /// The G-code content as a string.
    content: String,
}

impl GCode {
    /// Create a new empty GCode.
    pub fn new() -> Self {
        Self {
            content: String::new(),
        }
    }

    /// Create a GCode from a string.
    pub fn from_string(content: String) -> Self {
        Self { content }
    }

    /// Create a GCode from layer blocks.
    pub fn from_layers<S: AsRef<str>>(layers: &[S]) -> Self {
        let content = layers
            .iter()
            .map(|layer| layer.as_ref())
            .collect::<Vec<_>>()
            .join("\n");
        Self { content }
    }

    /// Get the G-code content as a string.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Consume the GCode and return its content.
    pub fn into_string(self) -> String {
        self.content
    }

    /// Get the length of the G-code content in bytes.
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// Check if the G-code is empty.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Split the content into layer blocks.
    pub fn layers(&self) -> Vec<String> {
        let mut layers = Vec::new();
        let mut current: Vec<&str> = Vec::new();

        for line in self.content.split('\n') {
            if line.starts_with(LAYER_KEYWORD) && !current.is_empty() {
                layers.push(current.join("\n"));
                current.clear();
            }
            current.push(line);
        }
        layers.push(current.join("\n"));

        layers
    }

    /// Number of `;LAYER:` blocks (not counting the leading header block).
    pub fn layer_count(&self) -> usize {
        self.content
            .split('\n')
            .filter(|line| line.starts_with(LAYER_KEYWORD))
            .count()
    }

    /// Write the G-code to a file.
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(self.content.as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    /// Read G-code from a file.
    pub fn read_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_string(content))
    }

    /// Get the number of lines in the G-code.
    pub fn line_count(&self) -> usize {
        self.content.lines().count()
    }
}

impl fmt::Debug for GCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "GCode({} bytes, {} lines, {} layers)",
            self.len(),
            self.line_count(),
            self.layer_count()
        )
    }
}

impl fmt::Display for GCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.content)
    }
}
