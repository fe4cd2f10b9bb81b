//! structscan - discovery front-end for Go JSON code generation.
//!
//! structscan scans Go packages and decides which type declarations should
//! receive generated serialization code. For each target it reports the
//! package import path, the package name, any build constraint found in the
//! file headers, and the ordered list of selected type names.
//!
//! # Architecture
//!
//! - `parser`: tree-sitter Go parsing lowered into an owned syntax model,
//!   plus the visitor interface used to walk it
//! - `discover`: annotation classification, build tag extraction, the
//!   discovery walk, source file selection and import path resolution
//! - `config`: YAML configuration schema
//! - `report`: output formatting (pretty, JSON)
//!
//! # Selection rules
//!
//! The first doc comment line starting with a marker decides: `easyjson:skip`
//! excludes the type, `easyjson:json` selects it whatever its shape. With
//! `all_structs` enabled every other top-level struct is selected too.

pub mod cli;
pub mod config;
pub mod discover;
pub mod error;
pub mod parser;
pub mod report;

pub use config::Config;
pub use discover::{
    classify, Annotation, ModuleResolver, PathResolver, ScanContext, ScanOptions, ScanResult,
    Scanner,
};
pub use error::ScanError;
pub use parser::{SourceParser, TreeSitterParser};

/// Scan a file or directory with the default resolver and parser.
pub fn scan<P: AsRef<std::path::Path>>(
    path: P,
    is_dir: bool,
    options: ScanOptions,
) -> error::Result<ScanResult> {
    Scanner::new(options).scan(path.as_ref(), is_dir)
}
