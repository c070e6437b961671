use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};
use std::borrow::Cow;

use super::DOT_COMMANDS;

const KEYWORDS: [&str; 18] = [
    "SELECT", "FROM", "WHERE", "INSERT", "INTO", "VALUES", "UPDATE", "SET", "DELETE", "CREATE",
    "DROP", "USE", "SHOW", "DATABASE", "DATABASES", "TABLE", "TABLES", "NULL",
];

/// Tab completion and hints for the shell.
///
/// Keywords complete in the case the user started typing them in. Database
/// and table names are refreshed from the catalog after each statement.
pub struct SqlHelper {
    keywords: Vec<String>,
    names: Vec<String>,
}

impl SqlHelper {
    pub fn new() -> Self {
        let mut keywords: Vec<String> = KEYWORDS.iter().map(|k| k.to_string()).collect();
        keywords.extend(DOT_COMMANDS.iter().map(|(cmd, _)| cmd.to_string()));
        Self {
            keywords,
            names: Vec::new(),
        }
    }

    pub fn set_names(&mut self, names: Vec<String>) {
        self.names = names;
    }

    fn candidates(&self, word: &str) -> Vec<String> {
        if word.is_empty() {
            return Vec::new();
        }
        let lower = word.to_lowercase();
        let lowercase_input = word.chars().all(|c| !c.is_uppercase());

        let keywords = self
            .keywords
            .iter()
            .filter(|k| k.to_lowercase().starts_with(&lower))
            .map(|k| {
                if lowercase_input {
                    k.to_lowercase()
                } else {
                    k.clone()
                }
            });
        let names = self
            .names
            .iter()
            .filter(|n| n.to_lowercase().starts_with(&lower))
            .cloned();

        keywords.chain(names).collect()
    }
}

impl Default for SqlHelper {
    fn default() -> Self {
        Self::new()
    }
}

fn word_start(line: &str) -> usize {
    line.rfind(|c: char| c.is_whitespace() || c == '(' || c == ',')
        .map(|i| i + 1)
        .unwrap_or(0)
}

impl Completer for SqlHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> Result<(usize, Vec<Pair>), ReadlineError> {
        let start = word_start(&line[..pos]);
        let matches = self
            .candidates(&line[start..pos])
            .into_iter()
            .map(|c| Pair {
                display: c.clone(),
                replacement: c,
            })
            .collect();

        Ok((start, matches))
    }
}

impl Hinter for SqlHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        if pos < line.len() {
            return None;
        }

        let word = &line[word_start(line)..];
        self.candidates(word)
            .into_iter()
            .find(|c| c.len() > word.len())
            .map(|c| c[word.len()..].to_string())
    }
}

impl Highlighter for SqlHelper {
    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Cow::Owned(hint.truecolor(100, 100, 100).to_string())
    }
}

impl Validator for SqlHelper {}

impl Helper for SqlHelper {}
