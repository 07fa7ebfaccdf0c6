//! Persistence gateways over the SeaORM entities.

use sea_orm::{DbErr, SqlErr};

use guestbook_core::RepoError;

mod todo;
mod wedding;

pub use todo::TodoRepository;
pub use wedding::WeddingRepository;

pub(crate) fn map_db_err(err: DbErr) -> RepoError {
    if let Some(sql) = err.sql_err() {
        return map_sql_err(sql);
    }
    match err {
        DbErr::RecordNotFound(_) | DbErr::RecordNotUpdated => RepoError::NotFound,
        DbErr::Conn(runtime) => RepoError::Connection(runtime.to_string()),
        other => RepoError::Query(other.to_string()),
    }
}

fn map_sql_err(err: SqlErr) -> RepoError {
    match err {
        SqlErr::UniqueConstraintViolation(msg) => RepoError::Constraint(msg),
        SqlErr::ForeignKeyConstraintViolation(msg) => RepoError::Constraint(msg),
        other => RepoError::Query(format!("{other:?}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_violations_surface_as_constraint_errors() {
        let mapped = map_sql_err(SqlErr::UniqueConstraintViolation(
            "duplicate key value violates unique constraint \"idx-guest_user-username\""
                .to_string(),
        ));
        assert!(matches!(mapped, RepoError::Constraint(msg) if msg.contains("username")));
    }

    #[test]
    fn foreign_key_violations_surface_as_constraint_errors() {
        let mapped = map_sql_err(SqlErr::ForeignKeyConstraintViolation(
            "violates foreign key constraint \"fk-comment-user_id\"".to_string(),
        ));
        assert!(matches!(mapped, RepoError::Constraint(_)));
    }

    #[test]
    fn missing_records_map_to_not_found() {
        assert!(matches!(
            map_db_err(DbErr::RecordNotUpdated),
            RepoError::NotFound
        ));
    }
}
