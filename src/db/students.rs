//! Student insertion.

use rusqlite::{params, Connection};

use crate::errors::{classify, Result};
use crate::models::NewStudent;

/// Insert one student. A duplicate id is rejected by the primary key and
/// surfaces as a `ConstraintViolation`.
pub fn add_student(conn: &Connection, student: &NewStudent) -> Result<usize> {
    conn.execute(
        "INSERT INTO student (id, name, email, phone) VALUES (?1, ?2, ?3, ?4)",
        params![student.id, student.name, student.email, student.phone],
    )
    .map_err(|err| classify(err, "failed to insert student"))
}
