use diesel::result::{DatabaseErrorKind, Error as DieselError};

use crate::domain::errors::DomainError;

impl From<DieselError> for DomainError {
    fn from(e: DieselError) -> Self {
        match e {
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                DomainError::Conflict(info.message().to_string())
            }
            DieselError::DatabaseError(
                DatabaseErrorKind::ForeignKeyViolation | DatabaseErrorKind::CheckViolation,
                info,
            ) => DomainError::InvalidInput(info.message().to_string()),
            DieselError::NotFound => DomainError::NotFound("record".to_string()),
            other => DomainError::Internal(other.to_string()),
        }
    }
}

impl From<r2d2::Error> for DomainError {
    fn from(e: r2d2::Error) -> Self {
        DomainError::Internal(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_row_maps_to_not_found() {
        let err: DomainError = DieselError::NotFound.into();
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[test]
    fn rolled_back_transaction_maps_to_internal() {
        let err: DomainError = DieselError::RollbackTransaction.into();
        assert!(matches!(err, DomainError::Internal(_)));
    }

    #[test]
    fn unique_violation_keeps_the_driver_message() {
        let err: DomainError = DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new(String::from(
                "duplicate key value violates unique constraint \"orders_number_display_key\"",
            )),
        )
        .into();
        match err {
            DomainError::Conflict(msg) => assert!(msg.contains("orders_number_display_key")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
