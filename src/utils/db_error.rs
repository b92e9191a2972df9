//! Classification of storage errors.

/// Returns true if the error is a unique-constraint violation.
///
/// SQLite reports these as `SQLITE_CONSTRAINT_UNIQUE` /
/// `SQLITE_CONSTRAINT_PRIMARYKEY`; the message check covers drivers built
/// without extended result codes.
pub fn is_unique_violation(e: &sqlx::Error) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    db_err.is_unique_violation() || db_err.message().contains("UNIQUE constraint failed")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_database_errors_are_not_unique_violations() {
        assert!(!is_unique_violation(&sqlx::Error::RowNotFound));
        assert!(!is_unique_violation(&sqlx::Error::PoolClosed));
    }
}
