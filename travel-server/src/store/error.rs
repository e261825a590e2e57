//! Storage error types.

/// Errors from a storage backend.
///
/// "Not found" is never an error here: lookups return `Ok(None)`.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The database rejected a query or is unreachable
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A value cannot be represented on one side of the storage boundary
    #[error("{table}.{field} holds out-of-range value {value}")]
    OutOfRange {
        table: &'static str,
        field: &'static str,
        value: i64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = StoreError::OutOfRange {
            table: "routes",
            field: "comfort_score",
            value: 9,
        };
        assert_eq!(
            err.to_string(),
            "routes.comfort_score holds out-of-range value 9"
        );

        let err = StoreError::from(sqlx::Error::RowNotFound);
        assert!(err.to_string().starts_with("database error:"));
    }
}
