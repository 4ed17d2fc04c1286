//! SQL identifier quoting utilities
//!
//! Provides safe quoting for SQL identifiers and qualified names so that
//! configured names (such as the ledger table) can be spliced into DDL.

/// Quote a SQL identifier to prevent injection.
///
/// Wraps the identifier in double quotes and escapes any embedded double quotes
/// by doubling them, following the SQL standard.
///
/// # Examples
/// ```
/// use tm_core::sql_utils::quote_ident;
/// assert_eq!(quote_ident("users"), r#""users""#);
/// assert_eq!(quote_ident(r#"my"table"#), r#""my""table""#);
/// ```
pub fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

/// Quote a potentially schema-qualified name (e.g. `schema.table`).
///
/// Splits on `.` and individually quotes each component.
///
/// # Examples
/// ```
/// use tm_core::sql_utils::quote_qualified;
/// assert_eq!(quote_qualified("schema_migrations"), r#""schema_migrations""#);
/// assert_eq!(quote_qualified("ops.ledger"), r#""ops"."ledger""#);
/// ```
pub fn quote_qualified(name: &str) -> String {
    name.split('.')
        .map(quote_ident)
        .collect::<Vec<_>>()
        .join(".")
}

/// Split a potentially schema-qualified table name into (schema, table).
///
/// Uses the last `.` as the separator. Unqualified names have no schema.
///
/// # Examples
/// ```
/// use tm_core::sql_utils::split_qualified_name;
/// assert_eq!(split_qualified_name("ledger"), (None, "ledger"));
/// assert_eq!(split_qualified_name("ops.ledger"), (Some("ops"), "ledger"));
/// ```
pub fn split_qualified_name(name: &str) -> (Option<&str>, &str) {
    match name.rfind('.') {
        Some(pos) => (Some(&name[..pos]), &name[pos + 1..]),
        None => (None, name),
    }
}
