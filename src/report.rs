//! Output formatting for scan results.
//!
//! Supports two output formats:
//! - Pretty: colored terminal output for human readability
//! - JSON: structured output consumed by the code generation stage

use colored::*;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

use crate::discover::ScanResult;

/// JSON report for one or more scanned targets, results in argument order.
#[derive(Serialize, Deserialize)]
pub struct JsonReport {
    pub version: String,
    pub results: Vec<ScanResult>,
}

/// Render results as pretty-printed JSON.
pub fn render_json(results: &[ScanResult]) -> anyhow::Result<String> {
    let report = JsonReport {
        version: env!("CARGO_PKG_VERSION").to_string(),
        results: results.to_vec(),
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

/// Write results in JSON format to stdout.
pub fn write_json(results: &[ScanResult]) -> anyhow::Result<()> {
    println!("{}", render_json(results)?);
    Ok(())
}

/// Render results for a terminal.
pub fn render_pretty(results: &[ScanResult]) -> String {
    let mut out = String::new();

    for (i, result) in results.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let _ = writeln!(out, "{} {}", "package".bold(), result.pkg_path.cyan());
        let _ = writeln!(out, "  name:       {}", result.pkg_name);
        if !result.build_tags.is_empty() {
            let _ = writeln!(out, "  build tags: {}", result.build_tags.yellow());
        }

        if result.struct_names.is_empty() {
            let _ = writeln!(out, "  {}", "no types selected".dimmed());
            continue;
        }
        let _ = writeln!(out, "  types ({}):", result.struct_names.len());
        for name in &result.struct_names {
            let _ = writeln!(out, "    {}", name.green());
        }
    }

    out
}

/// Write results in pretty format to stdout.
pub fn write_pretty(results: &[ScanResult]) {
    print!("{}", render_pretty(results));
}
