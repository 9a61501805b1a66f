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

use crate::grammar::symbol::{NonTerm, Symbol, Terminal};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// The LL(1) parsing table: `(nonterminal, lookahead) → production`.
///
/// Built once from a CSV source, validated symbol-by-symbol at load time,
/// and read-only afterwards. A missing entry is not an error here; it is a
/// normal lookup outcome that the engine turns into panic-mode recovery.
#[derive(Debug)]
pub struct ParseTable {
    entries: HashMap<(NonTerm, Terminal), Vec<Symbol>>,
}

/// Failures while loading a parsing table. All of these abort the run;
/// there is no point parsing against a half-read table.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("cannot open parsing table {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parsing table is empty")]
    Empty,

    #[error("malformed CSV line: {0}")]
    MalformedLine(String),

    #[error("unknown terminal \"{0}\" in table header")]
    UnknownTerminal(String),

    #[error("unknown nonterminal \"{0}\" in table row")]
    UnknownNonterminal(String),

    #[error("unknown symbol \"{symbol}\" in cell {nonterminal}/{terminal}")]
    UnknownSymbol {
        nonterminal: String,
        terminal: String,
        symbol: String,
    },
}

impl ParseTable {
    /// Loads a parsing table from a CSV file on disk.
    pub fn load(path: &Path) -> Result<Self, TableError> {
        let text = fs::read_to_string(path).map_err(|source| TableError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_csv(&text)
    }

    /// Parses a table from CSV text.
    ///
    /// Format: the header row lists terminal names (the first cell is the
    /// empty corner); each following row starts with a nonterminal name and
    /// carries one cell per terminal. A cell is `#` or empty for "no
    /// entry", the epsilon sentinel, or a whitespace-separated RHS.
    pub fn from_csv(text: &str) -> Result<Self, TableError> {
        let mut lines = text.lines();

        let header = lines.next().ok_or(TableError::Empty)?;
        let mut header_cells = split_csv_line(header)?;
        if header_cells.first().is_some_and(|cell| !cell.is_empty()) {
            header_cells.insert(0, String::new());
        }

        let mut terminals = Vec::new();
        for cell in header_cells.iter().skip(1) {
            terminals.push(sanitize_cell(cell));
        }
        while terminals.last().is_some_and(String::is_empty) {
            terminals.pop();
        }
        let terminals: Vec<Terminal> = terminals
            .into_iter()
            .map(|name| {
                Terminal::from_name(&name).ok_or(TableError::UnknownTerminal(name))
            })
            .collect::<Result<_, _>>()?;

        let mut entries = HashMap::new();

        for line in lines {
            if line.is_empty() {
                continue;
            }
            let cells = split_csv_line(line)?;
            if cells.is_empty() {
                continue;
            }

            let row_name = sanitize_cell(&cells[0]);
            if row_name.is_empty() {
                continue;
            }
            let nonterminal = NonTerm::from_name(&row_name)
                .ok_or(TableError::UnknownNonterminal(row_name))?;

            for (j, terminal) in terminals.iter().enumerate() {
                let Some(cell) = cells.get(j + 1) else {
                    break;
                };
                let value = sanitize_cell(cell);
                if value.is_empty() || value == "#" {
                    continue;
                }

                let rhs = if value == "EPSILON" || value == "&epsilon" {
                    vec![Symbol::Epsilon]
                } else {
                    value
                        .split_whitespace()
                        .map(|name| {
                            Symbol::from_name(name).ok_or_else(|| TableError::UnknownSymbol {
                                nonterminal: nonterminal.name().to_string(),
                                terminal: terminal.name().to_string(),
                                symbol: name.to_string(),
                            })
                        })
                        .collect::<Result<_, _>>()?
                };

                entries.insert((nonterminal, *terminal), rhs);
            }
        }

        Ok(Self { entries })
    }

    /// Looks up the production for a (nonterminal, lookahead) pair.
    ///
    /// Absence is a valid, expected outcome; the engine drives recovery
    /// from it.
    pub fn lookup(&self, nonterminal: NonTerm, lookahead: Terminal) -> Option<&[Symbol]> {
        self.entries
            .get(&(nonterminal, lookahead))
            .map(Vec::as_slice)
    }

    /// Number of populated cells.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Normalizes one raw CSV cell.
///
/// Strips non-breaking spaces, carriage returns and tabs, drops everything
/// up to and including a `→` arrow (spreadsheet exports often keep the
/// `LHS → RHS` text in the cell), and trims ASCII whitespace.
fn sanitize_cell(cell: &str) -> String {
    let mut value = cell.replace('\u{00A0}', " ");
    value = value.replace(['\r', '\t'], " ");

    if let Some(pos) = value.find('→') {
        value = value[pos + '→'.len_utf8()..].to_string();
    }

    value.trim().to_string()
}

/// Splits one CSV line into cells, rejoining quoted cells that contain
/// commas. A quote left unclosed at end of line is a hard error.
fn split_csv_line(line: &str) -> Result<Vec<String>, TableError> {
    let mut cells: Vec<String> = Vec::new();
    let mut parts = line.split(',');

    while let Some(part) = parts.next() {
        let mut cell = part.to_string();
        if cell.starts_with('"') && !cell.ends_with('"') {
            let mut closed = false;
            for tail in parts.by_ref() {
                cell.push(',');
                cell.push_str(tail);
                if tail.ends_with('"') {
                    closed = true;
                    break;
                }
            }
            if !closed {
                return Err(TableError::MalformedLine(line.to_string()));
            }
        }
        cells.push(cell);
    }

    Ok(cells)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn loads_entries_epsilon_and_gaps() {
        let table = ParseTable::from_csv(
            ",id,semi,$\n\
             EXPR,ARITHEXPR,,\n\
             REPTSTATBLOCK1,STATEMENT REPTSTATBLOCK1,EPSILON,#\n",
        )
        .unwrap();

        assert_eq!(
            table.lookup(NonTerm::Expr, Terminal::Id),
            Some(&[Symbol::NonTerminal(NonTerm::ArithExpr)][..])
        );
        assert_eq!(table.lookup(NonTerm::Expr, Terminal::Semi), None);
        assert_eq!(
            table.lookup(NonTerm::ReptStatBlock1, Terminal::Semi),
            Some(&[Symbol::Epsilon][..])
        );
        // "#" is a gap, same as an empty cell.
        assert_eq!(table.lookup(NonTerm::ReptStatBlock1, Terminal::End), None);
    }

    #[test]
    fn sanitizes_arrows_nbsp_and_tabs() {
        let table = ParseTable::from_csv(
            ",id\nEXPR,EXPR\u{00A0}→ ARITHEXPR\t\n",
        )
        .unwrap();
        assert_eq!(
            table.lookup(NonTerm::Expr, Terminal::Id),
            Some(&[Symbol::NonTerminal(NonTerm::ArithExpr)][..])
        );
    }

    #[test]
    fn rejoins_quoted_cells() {
        let cells = split_csv_line("A,\"x, y\",B").unwrap();
        assert_eq!(cells, vec!["A", "\"x, y\"", "B"]);
    }

    #[test]
    fn unclosed_quote_is_an_error() {
        assert!(matches!(
            split_csv_line("A,\"x, y"),
            Err(TableError::MalformedLine(_))
        ));
    }

    #[test]
    fn unknown_symbols_fail_at_load_time() {
        let err = ParseTable::from_csv(",id\nEXPR,FACTOR2\n").unwrap_err();
        assert!(matches!(err, TableError::UnknownSymbol { .. }));

        let err = ParseTable::from_csv(",id\nNOSUCHROW,id\n").unwrap_err();
        assert!(matches!(err, TableError::UnknownNonterminal(_)));

        let err = ParseTable::from_csv(",bogus\nEXPR,ARITHEXPR\n").unwrap_err();
        assert!(matches!(err, TableError::UnknownTerminal(_)));
    }

    #[test]
    fn shipped_table_loads() {
        let table =
            ParseTable::from_csv(include_str!("../../grammar/parsing_table.csv")).unwrap();
        assert!(!table.is_empty());
        assert_eq!(
            table.lookup(NonTerm::Start, Terminal::Class),
            Some(&[Symbol::NonTerminal(NonTerm::ReptStart0)][..])
        );
        assert_eq!(
            table.lookup(NonTerm::Statement, Terminal::Id),
            Some(
                &[
                    Symbol::NonTerminal(NonTerm::AssignStat),
                    Symbol::Terminal(Terminal::Semi)
                ][..]
            )
        );
        // The backwards member-access chain entry is deliberately kept.
        assert_eq!(
            table.lookup(NonTerm::IdNest, Terminal::Id),
            Some(
                &[
                    Symbol::Terminal(Terminal::Id),
                    Symbol::NonTerminal(NonTerm::ReptIdNest1),
                    Symbol::Terminal(Terminal::Dot)
                ][..]
            )
        );
        assert_eq!(table.lookup(NonTerm::IdNest, Terminal::Dot), None);
    }
}
