//! Script file representation

use crate::core::digest_of_file_contents;
use crate::error::{CscriptError, Result};
use serde::Serialize;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tracing::debug;

/// Prefix of the mandatory first line
const SHEBANG: &str = "#!";

/// Prefix of the optional second line carrying compiler flags
const COMPILER_DIRECTIVE: &str = "#gcc ";

/// A C source file run as a script
#[derive(Debug, Clone, Serialize)]
pub struct ScriptFile {
    /// Canonical absolute path of the script
    file_path: String,
    /// Last path component
    file_name: String,
    /// Hex SHA-256 of the whole file content
    digest: String,
    /// Flags from the `#gcc` line, empty when absent
    compiler_args: String,
    /// Number of directive lines preceding the C source
    start_line: usize,
    /// File content as read for the digest
    #[serde(skip)]
    content: Vec<u8>,
}

impl ScriptFile {
    /// Load a script and parse its directive lines
    ///
    /// # Arguments
    /// * `path` - Path to the script, relative or absolute
    ///
    /// # Returns
    /// The parsed script, or an error if it cannot be read or does not
    /// start with a shebang line
    pub fn open(path: &Path) -> Result<Self> {
        let canonical = fs::canonicalize(path).map_err(|e| CscriptError::io(path, e))?;
        let file_path = canonical
            .to_str()
            .ok_or_else(|| CscriptError::NonUtf8Path {
                path: canonical.clone(),
            })?
            .to_string();
        let file_name = canonical
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or(&file_path)
            .to_string();

        // Digest and source come from a single read so they always agree
        let mut content = Vec::new();
        let digest = digest_of_file_contents(&canonical, &mut content)?;
        let mut lines = content.split_inclusive(|&b| b == b'\n');

        if let Some(first) = lines.next() {
            if !first.starts_with(SHEBANG.as_bytes()) {
                return Err(CscriptError::ScriptFormat {
                    path: canonical.clone(),
                    line: String::from_utf8_lossy(first).trim_end().to_string(),
                });
            }
        }

        let mut compiler_args = String::new();
        let mut start_line = 1;
        if let Some(second) = lines.next().map(String::from_utf8_lossy) {
            if let Some(args) = second.strip_prefix(COMPILER_DIRECTIVE) {
                compiler_args = args.trim_end_matches(['\n', '\r']).to_string();
                start_line = 2;
            }
        }

        let script = Self {
            file_path,
            file_name,
            digest,
            compiler_args,
            start_line,
            content,
        };
        debug!(
            path = %script.file_path,
            digest = %script.digest,
            start_line,
            "opened script"
        );
        Ok(script)
    }

    /// Canonical absolute path
    #[inline]
    pub fn file_path(&self) -> &str {
        &self.file_path
    }

    /// File name without directories
    #[inline]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Hex content digest
    #[inline]
    pub fn digest(&self) -> &str {
        &self.digest
    }

    /// Flags from the `#gcc` line split on whitespace
    pub fn compiler_args(&self) -> impl Iterator<Item = &str> {
        self.compiler_args.split_whitespace()
    }

    /// Write the C source without the directive lines
    ///
    /// A `#line` marker keeps compiler diagnostics pointing at the script.
    pub fn extract_source<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writeln!(
            writer,
            "#line {} \"{}\"",
            self.start_line + 1,
            self.file_path.replace('\\', "\\\\").replace('"', "\\\"")
        )?;

        for line in self
            .content
            .split_inclusive(|&b| b == b'\n')
            .skip(self.start_line)
        {
            writer.write_all(line)?;
        }

        Ok(())
    }
}
