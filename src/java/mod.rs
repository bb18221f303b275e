//! Builds a symbol table from Java source code with tree-sitter.

/// Per-file parsing and declaration extraction.
pub mod file;
/// Tree-sitter parser wrapper.
pub mod parser;
/// Project-wide scan.
pub mod project;
/// Qualification of type names written in source.
mod resolve;

pub use file::{File, Import};
pub use parser::Parser;
pub use project::Project;
