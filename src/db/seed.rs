//! Canonical sample data and the reset operation that reloads it.

use rusqlite::{params, Connection};
use tracing::info;

use super::schema::Table;
use crate::errors::{classify, Result};

/// Canonical departments: (id, name, location).
pub const DEPARTMENTS: [(i64, &str, &str); 3] = [
    (10, "compsci", "JULIAN"),
    (20, "math", "julian"),
    (30, "drama", "Asbury"),
];

/// Canonical students: (id, name, email, phone).
pub const STUDENTS: [(i64, &str, &str, &str); 3] = [
    (1, "joe", "joe_2024@depauw.edu", "7657122287"),
    (2, "amy", "amy_2024@depauw.edu", "7657122288"),
    (3, "max", "max_2024@depauw.edu", "7657122289"),
];

/// Canonical books: (isbn, title, author, department id).
pub const BOOKS: [(i64, &str, &str, i64); 2] = [
    (5564, "Harry potter", "jk rowling", 30),
    (5563, "100 python days", "unknown", 10),
];

/// Canonical checkouts: (id, student id, isbn, returned).
pub const CHECKOUTS: [(i64, i64, i64, bool); 2] = [(1, 1, 5564, true), (2, 3, 5563, false)];

/// Row counts produced by one `reset`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResetSummary {
    pub deleted: usize,
    pub departments: usize,
    pub students: usize,
    pub books: usize,
    pub checkouts: usize,
}

impl ResetSummary {
    /// Report lines: the deleted total, then one inserted count per table.
    pub fn messages(&self) -> Vec<String> {
        vec![
            format!("{} records deleted", self.deleted),
            format!("{} department records inserted.", self.departments),
            format!("{} student records inserted.", self.students),
            format!("{} book records inserted.", self.books),
            format!("{} checkout records inserted.", self.checkouts),
        ]
    }
}

/// Clear every table and reinsert the canonical dataset.
///
/// Rows are deleted children first because references are checked per
/// statement. The sequence is not atomic: a failure partway through leaves
/// some tables reseeded and others not.
pub fn reset(conn: &Connection) -> Result<ResetSummary> {
    let mut summary = ResetSummary::default();

    for table in Table::drop_order() {
        summary.deleted += conn
            .execute(&format!("DELETE FROM {table}"), [])
            .map_err(|err| classify(err, "failed to clear table"))?;
    }

    for (id, name, location) in DEPARTMENTS {
        summary.departments += conn
            .execute(
                "INSERT INTO department (id, name, location) VALUES (?1, ?2, ?3)",
                params![id, name, location],
            )
            .map_err(|err| classify(err, "failed to seed department"))?;
    }

    for (id, name, email, phone) in STUDENTS {
        summary.students += conn
            .execute(
                "INSERT INTO student (id, name, email, phone) VALUES (?1, ?2, ?3, ?4)",
                params![id, name, email, phone],
            )
            .map_err(|err| classify(err, "failed to seed student"))?;
    }

    for (isbn, title, author, department_id) in BOOKS {
        summary.books += conn
            .execute(
                "INSERT INTO book (isbn, title, author, department_id) VALUES (?1, ?2, ?3, ?4)",
                params![isbn, title, author, department_id],
            )
            .map_err(|err| classify(err, "failed to seed book"))?;
    }

    for (id, student_id, isbn, returned) in CHECKOUTS {
        summary.checkouts += conn
            .execute(
                "INSERT INTO checkout (id, student_id, book_isbn, is_returned)
                 VALUES (?1, ?2, ?3, ?4)",
                params![id, student_id, isbn, returned],
            )
            .map_err(|err| classify(err, "failed to seed checkout"))?;
    }

    info!(
        deleted = summary.deleted,
        departments = summary.departments,
        students = summary.students,
        books = summary.books,
        checkouts = summary.checkouts,
        "tables reset"
    );
    Ok(summary)
}
