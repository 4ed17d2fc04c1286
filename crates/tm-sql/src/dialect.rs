//! SQL dialect selection

use sqlparser::dialect::{
    Dialect, DuckDbDialect, GenericDialect, PostgreSqlDialect, SQLiteDialect,
};

use crate::error::{SqlError, SqlResult};

static DUCKDB: DuckDbDialect = DuckDbDialect {};
static POSTGRES: PostgreSqlDialect = PostgreSqlDialect {};
static SQLITE: SQLiteDialect = SQLiteDialect {};
static GENERIC: GenericDialect = GenericDialect {};

/// Dialects the splitter knows how to tokenize
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SqlDialect {
    /// DuckDB
    #[default]
    DuckDb,
    /// PostgreSQL (dollar-quoted bodies)
    PostgreSql,
    /// SQLite
    Sqlite,
    /// Generic ANSI SQL
    Generic,
}

impl SqlDialect {
    /// Resolve a dialect from its configuration name
    pub fn from_name(name: &str) -> SqlResult<Self> {
        match name.to_lowercase().as_str() {
            "duckdb" => Ok(Self::DuckDb),
            "postgres" | "postgresql" => Ok(Self::PostgreSql),
            "sqlite" => Ok(Self::Sqlite),
            "generic" | "ansi" => Ok(Self::Generic),
            _ => Err(SqlError::UnknownDialect(name.to_string())),
        }
    }

    /// Get the dialect name
    pub fn name(&self) -> &'static str {
        match self {
            Self::DuckDb => "duckdb",
            Self::PostgreSql => "postgres",
            Self::Sqlite => "sqlite",
            Self::Generic => "generic",
        }
    }

    /// Get the underlying sqlparser dialect
    pub(crate) fn tokenizer_dialect(&self) -> &'static dyn Dialect {
        match self {
            Self::DuckDb => &DUCKDB,
            Self::PostgreSql => &POSTGRES,
            Self::Sqlite => &SQLITE,
            Self::Generic => &GENERIC,
        }
    }
}

/// Parse line and column from a sqlparser error message.
///
/// The tokenizer error is rendered as "... at Line: N, Column: M", so we
/// extract the location from the message text.
pub(crate) fn parse_location_from_error(msg: &str) -> (usize, usize) {
    let Some(line_idx) = msg.find("Line: ") else {
        return (0, 0);
    };
    let line_start = line_idx + 6;
    let Some(comma_idx) = msg[line_start..].find(',') else {
        return (0, 0);
    };
    let Ok(line) = msg[line_start..line_start + comma_idx]
        .trim()
        .parse::<usize>()
    else {
        return (0, 0);
    };
    let Some(col_idx) = msg.find("Column: ") else {
        return (0, 0);
    };
    let col_start = col_idx + 8;
    let col_end = msg[col_start..]
        .find(|c: char| !c.is_ascii_digit())
        .map(|i| col_start + i)
        .unwrap_or(msg.len());
    let Ok(column) = msg[col_start..col_end].trim().parse::<usize>() else {
        return (0, 0);
    };
    (line, column)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name() {
        assert_eq!(SqlDialect::from_name("duckdb").unwrap(), SqlDialect::DuckDb);
        assert_eq!(
            SqlDialect::from_name("PostgreSQL").unwrap(),
            SqlDialect::PostgreSql
        );
        assert_eq!(SqlDialect::from_name("sqlite").unwrap().name(), "sqlite");
        assert!(matches!(
            SqlDialect::from_name("oracle"),
            Err(SqlError::UnknownDialect(_))
        ));
    }

    #[test]
    fn test_parse_location_from_error() {
        assert_eq!(
            parse_location_from_error("Unterminated string literal at Line: 3, Column: 14"),
            (3, 14)
        );
        assert_eq!(parse_location_from_error("no location"), (0, 0));
    }
}
