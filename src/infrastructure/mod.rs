//! Infrastructure layer: I/O implementations and DI container
//!
//! This layer implements the filesystem and line-source boundaries and wires up services.

pub mod di;
pub mod error;
pub mod lines;
pub mod traits;

pub use error::{InfraError, InfraResult};
pub use lines::TextLines;
pub use traits::{FileSystem, LineSource, RealFileSystem};
