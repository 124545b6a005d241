//! Repositories bound to one SeaORM transaction

pub mod space_repository;
pub mod work_item_type_repository;

pub use space_repository::SeaOrmSpaceRepository;
pub use work_item_type_repository::SeaOrmWorkItemTypeRepository;

use sea_orm::{DbErr, SqlErr};
use wit_interfaces::DatabaseError;

/// Map a SeaORM error, keeping unique violations distinguishable
pub(crate) fn db_error(action: &str, err: DbErr) -> DatabaseError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail) | SqlErr::ForeignKeyConstraintViolation(detail)) => {
            DatabaseError::Constraint {
                message: format!("Failed to {}: {}", action, detail),
            }
        }
        _ => DatabaseError::Internal {
            message: format!("Failed to {}: {}", action, err),
        },
    }
}
