//! Identifier quoting for dynamically built statements.
//!
//! Schema and table names cannot be bound as statement parameters, so every
//! name that reaches SQL text goes through [`quote_identifier`]. Quoting is
//! structural: the name is wrapped in backticks and embedded backticks are
//! doubled, so any byte sequence maps to exactly one identifier and can never
//! terminate the quoted region early.

use crate::models::TableRef;

/// Quotes a MySQL/TiDB identifier with backticks.
///
/// # Example
/// ```rust
/// use rowid_audit_core::identifier::quote_identifier;
///
/// assert_eq!(quote_identifier("orders"), "`orders`");
/// assert_eq!(quote_identifier("we`ird"), "`we``ird`");
/// ```
pub fn quote_identifier(name: &str) -> String {
    let mut quoted = String::with_capacity(name.len().saturating_add(2));
    quoted.push('`');
    for ch in name.chars() {
        if ch == '`' {
            quoted.push('`');
        }
        quoted.push(ch);
    }
    quoted.push('`');
    quoted
}

/// Quotes a schema-qualified table name as `` `schema`.`table` ``.
pub fn quote_table(table: &TableRef) -> String {
    format!(
        "{}.{}",
        quote_identifier(&table.schema),
        quote_identifier(&table.table)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Reverses [`quote_identifier`], returning `None` for malformed input.
    fn unquote_identifier(quoted: &str) -> Option<String> {
        let inner = quoted.strip_prefix('`')?.strip_suffix('`')?;
        let mut name = String::with_capacity(inner.len());
        let mut chars = inner.chars();
        while let Some(ch) = chars.next() {
            if ch == '`' {
                // A lone backtick inside the quotes would have closed the identifier.
                if chars.next() != Some('`') {
                    return None;
                }
            }
            name.push(ch);
        }
        Some(name)
    }

    #[test]
    fn test_quote_plain_and_reserved_words() {
        assert_eq!(quote_identifier("users"), "`users`");
        assert_eq!(quote_identifier("select"), "`select`");
        assert_eq!(quote_identifier("order"), "`order`");
        assert_eq!(quote_identifier("my table"), "`my table`");
    }

    #[test]
    fn test_quote_embedded_backticks() {
        assert_eq!(quote_identifier("a`b"), "`a``b`");
        assert_eq!(quote_identifier("`"), "````");
        assert_eq!(
            quote_identifier("t`; DROP TABLE x; --"),
            "`t``; DROP TABLE x; --`"
        );
    }

    #[test]
    fn test_quote_empty_name() {
        assert_eq!(quote_identifier(""), "``");
    }

    #[test]
    fn test_quote_table() {
        let table = TableRef::new("shop", "order");
        assert_eq!(quote_table(&table), "`shop`.`order`");

        let table = TableRef::new("a.b", "c`d");
        assert_eq!(quote_table(&table), "`a.b`.`c``d`");
    }

    #[test]
    fn test_unquote_rejects_malformed() {
        assert_eq!(unquote_identifier("users"), None);
        assert_eq!(unquote_identifier("`a`b`"), None);
        assert_eq!(unquote_identifier("`a``b`").as_deref(), Some("a`b"));
    }

    proptest! {
        #[test]
        fn prop_quote_round_trips(name in ".*") {
            let quoted = quote_identifier(&name);
            prop_assert_eq!(unquote_identifier(&quoted), Some(name));
        }

        #[test]
        fn prop_quoted_backticks_are_balanced(name in ".*") {
            let quoted = quote_identifier(&name);
            let inner = &quoted[1..quoted.len() - 1];
            // Every backtick inside the quotes is part of a doubled pair.
            prop_assert_eq!(inner.matches('`').count() % 2, 0);
            prop_assert!(!inner.replace("``", "").contains('`'));
        }
    }
}
