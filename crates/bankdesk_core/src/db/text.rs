//! Unicode-aware text folding for search and ordering.
//!
//! SQLite's built-in `LIKE` and `NOCASE` only fold ASCII letters, so
//! `Élodie` and `élodie` would compare as different names.
//!
//! # Invariants
//! - The `unicode_fold` SQL function and the `UNICODE_NOCASE` collation share
//!   one folding rule, so search hits and list order agree.
//! - Folding is case-insensitive and accent-insensitive.
//! - Folding never changes ASCII punctuation, so escaped `LIKE` patterns keep
//!   their meaning.

use rusqlite::functions::FunctionFlags;
use rusqlite::Connection;
use std::cmp::Ordering;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Scalar SQL function: `unicode_fold(text) -> text`, `NULL` stays `NULL`.
pub const FOLD_FUNCTION: &str = "unicode_fold";
/// Collation name for `ORDER BY ... COLLATE UNICODE_NOCASE`.
pub const FOLD_COLLATION: &str = "UNICODE_NOCASE";

/// Folds `value` to its comparison key.
pub fn fold(value: &str) -> String {
    value
        .nfd()
        .filter(|ch| !is_combining_mark(*ch))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Registers the folding function and collation on `conn`.
///
/// Re-registering on the same connection replaces the previous definition.
pub fn register_text_functions(conn: &Connection) -> rusqlite::Result<()> {
    conn.create_scalar_function(
        FOLD_FUNCTION,
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let value: Option<String> = ctx.get(0)?;
            Ok(value.as_deref().map(fold))
        },
    )?;
    conn.create_collation(FOLD_COLLATION, compare_folded)?;
    Ok(())
}

fn compare_folded(left: &str, right: &str) -> Ordering {
    fold(left).cmp(&fold(right))
}
