pub mod actors;
pub mod likes;
pub mod movies;
pub mod reviews;
pub mod users;

use crate::error::CatalogError;

/// Maps a failed write to `Conflict` when it tripped one of the listed
/// unique indexes, otherwise to `Internal`.
pub(crate) fn write_error(
    err: sqlx::Error,
    context: &str,
    conflicts: &[(&str, &str)],
) -> CatalogError {
    if let Some(db_err) = err.as_database_error()
        && db_err.is_unique_violation()
    {
        let message = db_err
            .constraint()
            .and_then(|name| {
                conflicts
                    .iter()
                    .find(|(constraint, _)| *constraint == name)
                    .map(|(_, message)| *message)
            })
            .unwrap_or("Duplicate value");
        return CatalogError::Conflict(message.to_string());
    }
    read_error(err, context)
}

pub(crate) fn read_error(err: sqlx::Error, context: &str) -> CatalogError {
    CatalogError::Internal(format!("{context}: {err}"))
}
