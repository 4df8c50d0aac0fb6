//! Error kinds surfaced by the persistence layer and the command loop.
//!
//! Only `StoreUnavailable` (at startup) and `Console` (the terminal is gone)
//! end the program. Everything else is caught at the command boundary and
//! reported, and the session keeps going.

use std::io;
use std::path::PathBuf;

use rusqlite::{Error as SqlError, ErrorCode};
use thiserror::Error;

use crate::db::Table;

pub type Result<T, E = LibraryError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum LibraryError {
    /// The store could not be opened or bootstrapped at startup.
    #[error("cannot connect to the library store at {}", .path.display())]
    StoreUnavailable {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    /// A CREATE or DROP statement failed while laying down the schema.
    #[error("failed to {action} table {table}")]
    SchemaOperationFailed {
        table: Table,
        action: &'static str,
        #[source]
        source: SqlError,
    },

    /// A write was rejected by a uniqueness or reference rule.
    #[error("{message} ({affected} row(s) affected)")]
    ConstraintViolation { message: String, affected: usize },

    #[error("{context}: {source}")]
    QueryExecutionFailed {
        context: &'static str,
        #[source]
        source: SqlError,
    },

    /// A field typed at a prompt could not be parsed.
    #[error("invalid {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    #[error("terminal I/O failed")]
    Console(#[from] io::Error),
}

impl LibraryError {
    pub(crate) fn store_unavailable(
        path: impl Into<PathBuf>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        LibraryError::StoreUnavailable {
            path: path.into(),
            source: Box::new(source),
        }
    }

    /// Fatal errors end the session; every other kind is reported and the
    /// dispatcher returns to the selection prompt.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            LibraryError::StoreUnavailable { .. } | LibraryError::Console(_)
        )
    }
}

/// Classify a statement failure. Constraint errors become
/// `ConstraintViolation` so the caller can report the affected-row count;
/// anything else is a plain execution failure carrying `context`.
pub(crate) fn classify(err: SqlError, context: &'static str) -> LibraryError {
    if matches!(
        err.sqlite_error_code(),
        Some(ErrorCode::ConstraintViolation)
    ) {
        LibraryError::ConstraintViolation {
            message: format!("{context}: {err}"),
            affected: 0,
        }
    } else {
        LibraryError::QueryExecutionFailed {
            context,
            source: err,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn unique_violation_is_classified_as_constraint() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute("CREATE TABLE t (id INTEGER PRIMARY KEY)", [])
            .unwrap();
        conn.execute("INSERT INTO t (id) VALUES (1)", []).unwrap();
        let err = conn
            .execute("INSERT INTO t (id) VALUES (1)", [])
            .unwrap_err();

        match classify(err, "failed to insert") {
            LibraryError::ConstraintViolation { affected, message } => {
                assert_eq!(affected, 0);
                assert!(message.starts_with("failed to insert"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn syntax_errors_are_execution_failures() {
        let conn = Connection::open_in_memory().unwrap();
        let err = conn.execute("SELEC nothing", []).unwrap_err();

        let classified = classify(err, "failed to run");
        assert!(matches!(
            classified,
            LibraryError::QueryExecutionFailed { context: "failed to run", .. }
        ));
        assert!(!classified.is_fatal());
    }

    #[test]
    fn console_errors_are_fatal() {
        let err = LibraryError::from(io::Error::new(io::ErrorKind::BrokenPipe, "closed"));
        assert!(err.is_fatal());
    }
}
