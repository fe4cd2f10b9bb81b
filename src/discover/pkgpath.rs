//! Resolution of filesystem locations to Go import paths.
//!
//! The default resolver understands module mode (nearest `go.mod` above the
//! target) and falls back to the classic `GOPATH/src` layout.

use std::env;
use std::fs;
use std::path::{Component, Path, PathBuf};

use regex::Regex;
use tracing::debug;

use crate::error::{Result, ScanError};

lazy_static::lazy_static! {
    /// `module example.com/app` or `module "example.com/app"`.
    static ref MODULE_DIRECTIVE: Regex =
        Regex::new(r#"^module\s+"?([^"\s]+)"?"#).unwrap();
}

/// Maps a file or directory to the import path of its package.
pub trait PathResolver {
    /// `is_dir` tells whether `path` names a package directory or one file
    /// inside it.
    fn resolve(&self, path: &Path, is_dir: bool) -> Result<String>;
}

/// Resolver backed by `go.mod` files and `GOPATH`.
#[derive(Debug, Clone, Default)]
pub struct ModuleResolver {
    /// Explicit GOPATH entries; `None` reads the environment.
    gopath: Option<Vec<PathBuf>>,
}

impl ModuleResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use these GOPATH entries instead of the environment.
    pub fn with_gopath(gopath: Vec<PathBuf>) -> Self {
        Self {
            gopath: Some(gopath),
        }
    }

    fn gopath_entries(&self) -> Vec<PathBuf> {
        if let Some(entries) = &self.gopath {
            return entries.clone();
        }
        match env::var_os("GOPATH") {
            Some(value) if !value.is_empty() => env::split_paths(&value).collect(),
            _ => directories::BaseDirs::new()
                .map(|dirs| vec![dirs.home_dir().join("go")])
                .unwrap_or_default(),
        }
    }

    fn resolve_in_gopath(&self, dir: &Path) -> Option<String> {
        for entry in self.gopath_entries() {
            let Ok(root) = entry.canonicalize() else {
                continue;
            };
            if let Ok(rel) = dir.strip_prefix(root.join("src")) {
                let import = slash_path(rel);
                if !import.is_empty() {
                    return Some(import);
                }
            }
        }
        None
    }
}

impl PathResolver for ModuleResolver {
    fn resolve(&self, path: &Path, is_dir: bool) -> Result<String> {
        let abs = path
            .canonicalize()
            .map_err(|e| ScanError::resolution(path, e.to_string()))?;
        let dir = if is_dir {
            abs
        } else {
            abs.parent()
                .map(Path::to_path_buf)
                .ok_or_else(|| ScanError::resolution(path, "file has no parent directory"))?
        };

        if let Some((root, module)) = find_module(&dir)? {
            let rel = dir.strip_prefix(&root).unwrap_or(Path::new(""));
            let import = join_import(&module, &slash_path(rel));
            debug!(module = %module, import = %import, "resolved via go.mod");
            return Ok(import);
        }

        if let Some(import) = self.resolve_in_gopath(&dir) {
            debug!(import = %import, "resolved via GOPATH");
            return Ok(import);
        }

        Err(ScanError::resolution(
            path,
            "not inside a Go module and not under any GOPATH src directory",
        ))
    }
}

/// Find the nearest `go.mod` at or above `dir`, returning its directory and
/// declared module path.
pub fn find_module(dir: &Path) -> Result<Option<(PathBuf, String)>> {
    for ancestor in dir.ancestors() {
        let go_mod = ancestor.join("go.mod");
        if !go_mod.is_file() {
            continue;
        }
        let content = fs::read_to_string(&go_mod)
            .map_err(|e| ScanError::resolution(&go_mod, e.to_string()))?;
        let module = parse_module_path(&content)
            .ok_or_else(|| ScanError::resolution(&go_mod, "no module directive"))?;
        return Ok(Some((ancestor.to_path_buf(), module)));
    }
    Ok(None)
}

/// Extract the module path from `go.mod` content.
pub fn parse_module_path(content: &str) -> Option<String> {
    content
        .lines()
        .map(|line| line.split("//").next().unwrap_or("").trim())
        .find_map(|line| {
            MODULE_DIRECTIVE
                .captures(line)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().to_string())
        })
}

fn join_import(module: &str, rel: &str) -> String {
    if rel.is_empty() {
        module.to_string()
    } else {
        format!("{}/{}", module, rel)
    }
}

/// Render a relative path with `/` separators.
fn slash_path(rel: &Path) -> String {
    rel.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
