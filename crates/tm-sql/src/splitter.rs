//! Split a migration script into individually executable statements.
//!
//! The script is tokenized with sqlparser-rs and cut only at top-level
//! semicolons. Semicolons inside string literals, quoted identifiers,
//! comments, and dollar-quoted bodies are part of a token and never split.
//!
//! `CREATE TRIGGER`, `CREATE FUNCTION`, and `CREATE PROCEDURE` statements may
//! carry a `BEGIN ... END` body with semicolons of their own; the splitter
//! tracks `BEGIN`/`CASE`/`END` nesting inside those statements and keeps the
//! body whole.
//!
//! Fragments made only of whitespace and comments are dropped. Statements
//! are returned exactly as written, so the executed SQL is the checksummed
//! SQL.

use crate::dialect::{parse_location_from_error, SqlDialect};
use crate::error::{SqlError, SqlResult};
use sqlparser::keywords::Keyword;
use sqlparser::tokenizer::{Location, Token, TokenWithSpan, Tokenizer};

/// Dialect-aware statement splitter
#[derive(Debug, Clone, Copy, Default)]
pub struct StatementSplitter {
    dialect: SqlDialect,
}

impl StatementSplitter {
    /// Create a splitter for `dialect`
    pub fn new(dialect: SqlDialect) -> Self {
        Self { dialect }
    }

    /// Get the dialect
    pub fn dialect(&self) -> SqlDialect {
        self.dialect
    }

    /// Split `sql` into trimmed, non-empty statements without their
    /// terminating semicolons.
    ///
    /// Each statement is a verbatim slice of `sql`; tokens only locate the
    /// boundaries.
    pub fn split(&self, sql: &str) -> SqlResult<Vec<String>> {
        let tokens = Tokenizer::new(self.dialect.tokenizer_dialect(), sql)
            .with_unescape(false)
            .tokenize_with_location()
            .map_err(|e| {
                let message = e.to_string();
                let (line, column) = parse_location_from_error(&message);
                SqlError::TokenizeError {
                    message,
                    line,
                    column,
                }
            })?;

        let lines = LineIndex::new(sql);
        let mut statements = Vec::new();
        let mut current = StatementState::default();
        let mut start = 0;

        for TokenWithSpan { token, span } in &tokens {
            if matches!(token, Token::SemiColon) && current.body_depth == 0 {
                let end = lines.offset(span.start);
                current.flush_into(&sql[start..end], &mut statements);
                start = lines.offset(span.end);
                continue;
            }
            current.observe(token);
        }
        current.flush_into(&sql[start..], &mut statements);

        Ok(statements)
    }
}

/// Convenience wrapper splitting with the default (DuckDB) dialect
pub fn split_statements(sql: &str) -> SqlResult<Vec<String>> {
    StatementSplitter::default().split(sql)
}

/// Nesting state of the statement being scanned
#[derive(Default)]
struct StatementState {
    has_content: bool,
    creating: bool,
    routine: bool,
    body_depth: usize,
}

impl StatementState {
    fn observe(&mut self, token: &Token) {
        match token {
            Token::EOF | Token::Whitespace(_) => {}
            Token::Word(word) if word.quote_style.is_none() => {
                self.track_keyword(word.keyword);
                self.has_content = true;
            }
            _ => self.has_content = true,
        }
    }

    fn track_keyword(&mut self, keyword: Keyword) {
        match keyword {
            Keyword::CREATE if !self.has_content => self.creating = true,
            Keyword::TRIGGER | Keyword::FUNCTION | Keyword::PROCEDURE if self.creating => {
                self.routine = true
            }
            Keyword::BEGIN if self.routine => self.body_depth += 1,
            Keyword::CASE if self.body_depth > 0 => self.body_depth += 1,
            Keyword::END if self.body_depth > 0 => self.body_depth -= 1,
            _ => {}
        }
    }

    fn flush_into(&mut self, text: &str, statements: &mut Vec<String>) {
        let state = std::mem::take(self);
        if state.has_content {
            statements.push(text.trim().to_string());
        }
    }
}

/// Maps tokenizer locations (1-based line, 1-based char column) to byte
/// offsets in the source.
struct LineIndex<'a> {
    sql: &'a str,
    line_starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    fn new(sql: &'a str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(sql.match_indices('\n').map(|(i, _)| i + 1));
        Self { sql, line_starts }
    }

    fn offset(&self, location: Location) -> usize {
        let line = usize::try_from(location.line).unwrap_or(usize::MAX);
        let Some(&line_start) = self.line_starts.get(line.saturating_sub(1)) else {
            return self.sql.len();
        };
        let column = usize::try_from(location.column)
            .unwrap_or(usize::MAX)
            .saturating_sub(1);
        self.sql[line_start..]
            .char_indices()
            .nth(column)
            .map_or(self.sql.len(), |(i, _)| line_start + i)
    }
}

#[cfg(test)]
#[path = "splitter_test.rs"]
mod tests;
