//! Discovery of the Go types that should receive generated code.
//!
//! A scan resolves the target's import path, parses its source files, and
//! walks them with a [`ScanContext`], consulting the annotation classifier
//! for every type declaration and the build tag extractor once per file.

mod annotation;
mod build_tag;
mod files;
mod pkgpath;
mod scanner;
mod types;
mod walker;

pub use annotation::{classify, Annotation, INCLUDE_MARKER, SKIP_MARKER};
pub use build_tag::{build_tag, BUILD_TAG_PREFIXES};
pub use files::{
    build_exclude_set, collect_source_files, is_source_file, GENERATED_SUFFIX, SOURCE_SUFFIX,
    TEST_SUFFIX,
};
pub use pkgpath::{find_module, parse_module_path, ModuleResolver, PathResolver};
pub use scanner::Scanner;
pub use types::{ScanOptions, ScanResult};
pub use walker::ScanContext;
