use crate::error::AppError;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// Utility for converting database errors to structured AppError variants.
///
/// Integrity violations surface as the generic 422 class; anything else the
/// store raises is an opaque 500 whose detail stays in the logs.
pub struct DatabaseErrorConverter;

impl DatabaseErrorConverter {
    /// Converts a Diesel error to an appropriate AppError variant.
    ///
    /// # Arguments
    /// * `error` - The Diesel error to convert
    /// * `operation` - Description of the database operation that failed
    pub fn convert_diesel_error(error: DieselError, operation: &str) -> AppError {
        match error {
            DieselError::NotFound => AppError::NotFound {
                entity: "resource".to_string(),
                field: "id".to_string(),
                value: "unknown".to_string(),
            },
            DieselError::DatabaseError(kind, _) if Self::is_integrity_violation(&kind) => {
                tracing::warn!(operation, ?kind, "Integrity constraint violated");
                AppError::unprocessable()
            }
            other => AppError::Database {
                operation: operation.to_string(),
                source: anyhow::Error::from(other),
            },
        }
    }

    /// Name of the violated unique constraint, if `error` is a unique violation.
    pub fn unique_constraint(error: &DieselError) -> Option<&str> {
        match error {
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                info.constraint_name()
            }
            _ => None,
        }
    }

    fn is_integrity_violation(kind: &DatabaseErrorKind) -> bool {
        matches!(
            kind,
            DatabaseErrorKind::UniqueViolation
                | DatabaseErrorKind::ForeignKeyViolation
                | DatabaseErrorKind::NotNullViolation
                | DatabaseErrorKind::CheckViolation
        )
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    // Mock database error information for testing
    pub(crate) struct MockDatabaseErrorInfo {
        pub message: String,
        pub constraint_name: Option<String>,
    }

    impl diesel::result::DatabaseErrorInformation for MockDatabaseErrorInfo {
        fn message(&self) -> &str {
            &self.message
        }

        fn details(&self) -> Option<&str> {
            None
        }

        fn hint(&self) -> Option<&str> {
            None
        }

        fn table_name(&self) -> Option<&str> {
            None
        }

        fn column_name(&self) -> Option<&str> {
            None
        }

        fn constraint_name(&self) -> Option<&str> {
            self.constraint_name.as_deref()
        }

        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    pub(crate) fn database_error(kind: DatabaseErrorKind, constraint: Option<&str>) -> DieselError {
        DieselError::DatabaseError(
            kind,
            Box::new(MockDatabaseErrorInfo {
                message: "constraint violated".to_string(),
                constraint_name: constraint.map(str::to_string),
            }),
        )
    }

    #[test]
    fn test_convert_not_found_error() {
        let result = DatabaseErrorConverter::convert_diesel_error(DieselError::NotFound, "find venue");
        assert!(matches!(result, AppError::NotFound { .. }));
    }

    #[test]
    fn test_not_null_violation_is_unprocessable() {
        let error = database_error(DatabaseErrorKind::NotNullViolation, None);
        let result = DatabaseErrorConverter::convert_diesel_error(error, "insert question");

        match result {
            AppError::Unprocessable { message } => assert_eq!(message, "unprocessable"),
            other => panic!("Expected Unprocessable error, got: {:?}", other),
        }
    }

    #[test]
    fn test_foreign_key_violation_is_unprocessable() {
        let error = database_error(
            DatabaseErrorKind::ForeignKeyViolation,
            Some("questions_category_fkey"),
        );
        let result = DatabaseErrorConverter::convert_diesel_error(error, "insert question");
        assert!(matches!(result, AppError::Unprocessable { .. }));
    }

    #[test]
    fn test_other_errors_are_opaque() {
        let result =
            DatabaseErrorConverter::convert_diesel_error(DieselError::RollbackTransaction, "commit");
        match result {
            AppError::Database { operation, .. } => assert_eq!(operation, "commit"),
            other => panic!("Expected Database error, got: {:?}", other),
        }
    }

    #[test]
    fn test_unique_constraint_name() {
        let error = database_error(DatabaseErrorKind::UniqueViolation, Some("venues_name_key"));
        assert_eq!(
            DatabaseErrorConverter::unique_constraint(&error),
            Some("venues_name_key")
        );

        let error = database_error(DatabaseErrorKind::CheckViolation, Some("drinks_title_check"));
        assert_eq!(DatabaseErrorConverter::unique_constraint(&error), None);
    }
}
