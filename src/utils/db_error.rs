//! Classification of database errors.

/// Name of the unique constraint guarding `alias_mappings.alias`.
pub const ALIAS_UNIQUE_CONSTRAINT: &str = "alias_mappings_alias_key";

/// Returns true if `e` is a unique violation on the alias column.
pub fn is_unique_violation_on_alias(e: &sqlx::Error) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    if !db_err.is_unique_violation() {
        return false;
    }

    matches!(db_err.constraint(), Some(ALIAS_UNIQUE_CONSTRAINT))
}
