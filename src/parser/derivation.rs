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

use crate::grammar::symbol::{is_epsilon_production, NonTerm, Symbol};

/// Reconstructs the leftmost derivation as the engine expands productions.
///
/// Holds the current sentential form and appends its rendering to the
/// trace after every application, starting with the start symbol alone.
#[derive(Debug)]
pub struct Derivation {
    sentential: Vec<Symbol>,
    trace: Vec<String>,
}

impl Derivation {
    pub fn new(start: NonTerm) -> Self {
        let sentential = vec![Symbol::NonTerminal(start)];
        let mut derivation = Self {
            sentential,
            trace: Vec::new(),
        };
        derivation.record();
        derivation
    }

    /// Replaces the leftmost nonterminal with `rhs` (or deletes it, for the
    /// epsilon production) and records the new sentential form.
    ///
    /// No-op when the sentential form holds no nonterminal; that only
    /// happens on malformed input after recovery has drained the form.
    pub fn apply(&mut self, rhs: &[Symbol]) {
        let Some(position) = self
            .sentential
            .iter()
            .position(|symbol| matches!(symbol, Symbol::NonTerminal(_)))
        else {
            return;
        };

        if is_epsilon_production(rhs) {
            self.sentential.remove(position);
        } else {
            self.sentential
                .splice(position..=position, rhs.iter().copied());
        }
        self.record();
    }

    fn record(&mut self) {
        let rendered = self
            .sentential
            .iter()
            .map(|symbol| symbol.name())
            .collect::<Vec<_>>()
            .join(" ");
        self.trace.push(rendered);
    }

    /// The recorded trace, one sentential form per entry.
    pub fn trace(&self) -> &[String] {
        &self.trace
    }

    pub fn into_trace(self) -> Vec<String> {
        self.trace
    }
}
