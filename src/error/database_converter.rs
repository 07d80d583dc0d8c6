use crate::error::{AppError, ConstraintParser};
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};

/// Converts Diesel errors into `AppError`.
///
/// Only unique and foreign key violations are recognised. A foreign key
/// violation naming an absent referent becomes `IdNotFound`; one raised by
/// deleting a row that is still referenced becomes `InvalidInput`. Every
/// other failure, including `NotFound` from a `get_result`, becomes `Storage`.
pub struct DatabaseErrorConverter;

impl DatabaseErrorConverter {
    /// Converts a Diesel error, tagging unrecognised failures with `operation`.
    pub fn convert_diesel_error(error: DieselError, operation: &str) -> AppError {
        match error {
            DieselError::DatabaseError(kind, info) => {
                match Self::convert_database_error(&kind, info.as_ref(), operation) {
                    Some(converted) => converted,
                    None => AppError::storage(operation, DieselError::DatabaseError(kind, info)),
                }
            }
            other => AppError::storage(operation, other),
        }
    }

    /// Like `convert_diesel_error`, but a foreign key violation is only
    /// translated when its field is one of `expected`. Any other violation
    /// stays `Storage` with the diesel error, constraint name included, as
    /// its source.
    pub fn convert_expected_foreign_keys(
        error: DieselError,
        operation: &str,
        expected: &[&str],
    ) -> AppError {
        if let DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) = &error {
            let field = info
                .constraint_name()
                .map(str::to_string)
                .or_else(|| ConstraintParser::extract_constraint_from_message(info.message()))
                .and_then(|constraint| ConstraintParser::field_for_constraint(&constraint));
            if !field.is_some_and(|field| expected.contains(&field.as_str())) {
                tracing::debug!(operation, "Unexpected foreign key violation");
                return AppError::storage(operation, error);
            }
        }
        Self::convert_diesel_error(error, operation)
    }

    fn convert_database_error(
        kind: &DatabaseErrorKind,
        info: &(dyn DatabaseErrorInformation + Send + Sync),
        operation: &str,
    ) -> Option<AppError> {
        let message = info.message();
        let constraint_name = info.constraint_name();

        match kind {
            DatabaseErrorKind::UniqueViolation => {
                let field = ConstraintParser::parse_unique_violation(message, constraint_name)?;
                tracing::debug!(operation, field = %field, "Unique constraint violated");
                Some(AppError::UniqueValue { field })
            }
            DatabaseErrorKind::ForeignKeyViolation => {
                let details = info.details();
                let (field, id) =
                    ConstraintParser::parse_foreign_key_violation(message, details, constraint_name)?;
                if ConstraintParser::is_still_referenced(message, details) {
                    tracing::debug!(operation, field = %field, id, "Row is still referenced");
                    return Some(AppError::invalid_input(format!(
                        "{}[{}] is still referenced",
                        field, id
                    )));
                }
                tracing::debug!(operation, field = %field, id, "Foreign key violated");
                Some(AppError::IdNotFound { field, id })
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Mock database error information for testing
    struct MockDatabaseErrorInfo {
        message: String,
        details: Option<String>,
        constraint_name: Option<String>,
    }

    impl DatabaseErrorInformation for MockDatabaseErrorInfo {
        fn message(&self) -> &str {
            &self.message
        }

        fn details(&self) -> Option<&str> {
            self.details.as_deref()
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

    fn db_error(kind: DatabaseErrorKind, message: &str, details: Option<&str>, constraint: Option<&str>) -> DieselError {
        DieselError::DatabaseError(
            kind,
            Box::new(MockDatabaseErrorInfo {
                message: message.to_string(),
                details: details.map(str::to_string),
                constraint_name: constraint.map(str::to_string),
            }),
        )
    }

    #[test]
    fn not_found_becomes_storage() {
        let result = DatabaseErrorConverter::convert_diesel_error(DieselError::NotFound, "find order");
        match result {
            AppError::Storage { operation, .. } => assert_eq!(operation, "find order"),
            other => panic!("Expected Storage error, got: {:?}", other),
        }
    }

    #[test]
    fn unique_violation_becomes_unique_value() {
        let error = db_error(
            DatabaseErrorKind::UniqueViolation,
            "duplicate key value violates unique constraint \"users_email_key\"",
            Some("Key (email)=(test@example.com) already exists."),
            Some("users_email_key"),
        );
        match DatabaseErrorConverter::convert_diesel_error(error, "insert user") {
            AppError::UniqueValue { field } => assert_eq!(field, "email"),
            other => panic!("Expected UniqueValue error, got: {:?}", other),
        }
    }

    #[test]
    fn foreign_key_violation_becomes_id_not_found() {
        let error = db_error(
            DatabaseErrorKind::ForeignKeyViolation,
            "insert or update on table \"order_lines\" violates foreign key constraint \"order_lines_color_fkey\"",
            Some("Key (color_id)=(7) is not present in table \"colors\"."),
            Some("order_lines_color_fkey"),
        );
        match DatabaseErrorConverter::convert_diesel_error(error, "add order line") {
            AppError::IdNotFound { field, id } => {
                assert_eq!(field, "color");
                assert_eq!(id, 7);
            }
            other => panic!("Expected IdNotFound error, got: {:?}", other),
        }
    }

    #[test]
    fn deleting_referenced_row_is_invalid_input() {
        let error = db_error(
            DatabaseErrorKind::ForeignKeyViolation,
            "update or delete on table \"deliveries\" violates foreign key constraint \"orders_delivery_fkey\" on table \"orders\"",
            Some("Key (id)=(15) is still referenced from table \"orders\"."),
            Some("orders_delivery_fkey"),
        );
        match DatabaseErrorConverter::convert_diesel_error(error, "delete delivery") {
            AppError::InvalidInput { message } => {
                assert_eq!(message, "delivery[15] is still referenced")
            }
            other => panic!("Expected InvalidInput error, got: {:?}", other),
        }
    }

    #[test]
    fn unexpected_foreign_key_keeps_diesel_source() {
        let error = db_error(
            DatabaseErrorKind::ForeignKeyViolation,
            "insert or update on table \"order_lines\" violates foreign key constraint \"order_lines_order_fkey\"",
            Some("Key (order_id)=(5) is not present in table \"orders\"."),
            Some("order_lines_order_fkey"),
        );
        match DatabaseErrorConverter::convert_expected_foreign_keys(error, "insert order line", &["item", "color"]) {
            AppError::Storage { operation, source } => {
                assert_eq!(operation, "insert order line");
                assert!(source.downcast_ref::<DieselError>().is_some());
                assert!(source.to_string().contains("order_lines_order_fkey"));
            }
            other => panic!("Expected Storage error, got: {:?}", other),
        }
    }

    #[test]
    fn expected_foreign_key_is_translated() {
        let error = db_error(
            DatabaseErrorKind::ForeignKeyViolation,
            "insert or update on table \"order_lines\" violates foreign key constraint \"order_lines_item_fkey\"",
            Some("Key (item_id)=(11) is not present in table \"items\"."),
            Some("order_lines_item_fkey"),
        );
        match DatabaseErrorConverter::convert_expected_foreign_keys(error, "insert order line", &["item", "color"]) {
            AppError::IdNotFound { field, id } => {
                assert_eq!(field, "item");
                assert_eq!(id, 11);
            }
            other => panic!("Expected IdNotFound error, got: {:?}", other),
        }
    }

    #[test]
    fn unparseable_foreign_key_violation_stays_storage() {
        let error = db_error(DatabaseErrorKind::ForeignKeyViolation, "fk violated", None, None);
        assert!(matches!(
            DatabaseErrorConverter::convert_diesel_error(error, "insert order"),
            AppError::Storage { .. }
        ));
    }

    #[test]
    fn check_violation_stays_storage() {
        let error = db_error(
            DatabaseErrorKind::CheckViolation,
            "new row for relation \"order_lines\" violates check constraint \"order_lines_quantity_check\"",
            None,
            Some("order_lines_quantity_check"),
        );
        match DatabaseErrorConverter::convert_diesel_error(error, "add order line") {
            AppError::Storage { operation, source } => {
                assert_eq!(operation, "add order line");
                assert!(source.to_string().contains("quantity_check"));
            }
            other => panic!("Expected Storage error, got: {:?}", other),
        }
    }
}
