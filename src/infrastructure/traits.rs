//! I/O boundary traits for testability
//!
//! These traits abstract where text comes from, allowing the readers
//! and services to be tested without files on disk.

use std::io;
use std::path::Path;

/// Filesystem abstraction for testability.
pub trait FileSystem: Send + Sync {
    /// Read file contents to string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Check if path is a file.
    fn is_file(&self, path: &Path) -> bool;
}

/// Supplies the lines of a specification, one at a time.
///
/// Readers never look further ahead than the current line.
pub trait LineSource {
    /// Text of the current line, or `None` at end of input.
    fn current_line(&self) -> Option<&str>;

    /// 1-based source line number of the current line.
    /// At end of input this is one past the last line.
    fn line_number(&self) -> usize;

    /// Move to the next line.
    fn advance(&mut self);

    fn at_end(&self) -> bool {
        self.current_line().is_none()
    }

    /// First whitespace-delimited word of the current line.
    fn leading_token(&self) -> Option<&str> {
        self.current_line()
            .and_then(|line| line.split_whitespace().next())
    }
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Real filesystem implementation.
#[derive(Debug, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }
}
