/*
 * ==========================================================================
 * PROWL - Parse with Claws!
 * ==========================================================================
 *
 * Author:   Sam Wilcox
 * Email:    sam@prowl-lang.com
 * Website:  https://www.prowl-lang.com
 * Github:   https://github.com/samwilcox/prowl
 *
 * License:
 * This file is part of the PROWL language toolchain project.
 *
 * PROWL is dual-licensed under the terms of:
 *   - The MIT license
 *   - The Apache License, Version 2.0
 *
 * You may choose either license to govern your use of this software.
 * Full license text available at:
 *    https://license.prowl-lang.com
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under these licenses is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *
 * ==========================================================================
 */

use clap::Parser;
use prowl::driver::{self, DriveOptions};
use prowl::grammar::table::ParseTable;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// The PROWL parser driver.
///
/// Parses every matched source unit independently against the supplied
/// parsing table and writes each unit's artifact set next to it.
#[derive(Debug, Parser)]
#[command(
    name = "prowl",
    version,
    about = "Prowl programming language parser - Parse with Claws"
)]
struct Cli {
    /// Path to the parsing table CSV.
    table: PathBuf,

    /// Source files, directories, or glob patterns (`*` and `?`).
    #[arg(required = true)]
    inputs: Vec<String>,

    /// Also write a pretty-printed JSON AST next to each source file.
    #[arg(long)]
    emit_json: bool,

    /// Render recorded errors as caret diagnostics on stderr.
    #[arg(long)]
    diagnostics: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let table = match ParseTable::load(&cli.table) {
        Ok(table) => table,
        Err(error) => {
            eprintln!("Failed to load parsing table: {}", error);
            return ExitCode::from(1);
        }
    };
    tracing::debug!(entries = table.len(), "parsing table loaded");

    let mut had_missing = false;
    let mut files = Vec::new();
    for spec in &cli.inputs {
        let expanded = expand_input_spec(spec);
        if expanded.is_empty() {
            eprintln!("No source files matched \"{}\".", spec);
            had_missing = true;
        } else {
            files.extend(expanded);
        }
    }
    files.sort();
    files.dedup();

    if files.is_empty() {
        eprintln!("No input source files found.");
        return ExitCode::from(1);
    }

    let options = DriveOptions {
        emit_json: cli.emit_json,
        render_diagnostics: cli.diagnostics,
    };

    let mut any_errors = false;
    for file in &files {
        match driver::parse_file(file, &table, &options) {
            Ok(outcome) => {
                if outcome.had_errors() {
                    any_errors = true;
                    println!(
                        "[FAIL] {} (see {})",
                        file.display(),
                        outcome.error_path.display()
                    );
                } else {
                    print!("[OK]   {}", file.display());
                    if let (Some(text), Some(dot)) =
                        (&outcome.ast_text_path, &outcome.ast_dot_path)
                    {
                        print!(" -> {}, {}", text.display(), dot.display());
                    }
                    println!(" (tokens: {})", outcome.tokens_path.display());
                }
            }
            Err(error) => {
                any_errors = true;
                eprintln!("{}: {}", file.display(), error);
            }
        }
    }

    if any_errors {
        return ExitCode::from(2);
    }
    if had_missing {
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

/// True when the spec carries a `*` or `?` wildcard.
fn has_wildcard(spec: &str) -> bool {
    spec.contains('*') || spec.contains('?')
}

/// PROWL source units use the `.src` or `.source` extension.
fn is_source_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("src") | Some("source")
    )
}

/// Compiles a filename wildcard pattern into an anchored regex.
fn pattern_regex(pattern: &str) -> Option<Regex> {
    let translated = regex::escape(pattern)
        .replace("\\*", ".*")
        .replace("\\?", ".");
    Regex::new(&format!("^{}$", translated)).ok()
}

/// Expands one input spec into source files: a wildcard pattern over its
/// directory, a directory's immediate source files, or a single file.
fn expand_input_spec(spec: &str) -> Vec<PathBuf> {
    let mut results = Vec::new();

    if has_wildcard(spec) {
        let pattern_path = Path::new(spec);
        let dir = match pattern_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let Some(name_pattern) = pattern_path
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(pattern_regex)
        else {
            return results;
        };

        let Ok(entries) = fs::read_dir(&dir) else {
            return results;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            let matches = path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name_pattern.is_match(name));
            if matches && path.is_file() && is_source_file(&path) {
                results.push(path);
            }
        }
        return results;
    }

    let path = Path::new(spec);
    if path.is_dir() {
        if let Ok(entries) = fs::read_dir(path) {
            for entry in entries.flatten() {
                let candidate = entry.path();
                if candidate.is_file() && is_source_file(&candidate) {
                    results.push(candidate);
                }
            }
        }
    } else if path.is_file() && is_source_file(path) {
        results.push(path.to_path_buf());
    }

    results
}
