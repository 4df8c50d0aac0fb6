//! Checkout reports joining students and books.

use rusqlite::{params, Connection};

use crate::errors::{classify, Result};
use crate::models::CheckoutRow;

/// Books checked out by the student named exactly `student_name` whose
/// checkout is flagged as returned.
pub fn find_checkouts_by_student(conn: &Connection, student_name: &str) -> Result<Vec<CheckoutRow>> {
    let mut stmt = conn
        .prepare(
            "SELECT s.name, s.id, s.email, b.isbn, b.title, b.author
             FROM checkout c
             INNER JOIN student s ON c.student_id = s.id
             INNER JOIN book b ON c.book_isbn = b.isbn
             WHERE c.is_returned = 1
               AND s.name = ?1
             ORDER BY c.id",
        )
        .map_err(|err| classify(err, "failed to prepare checkout query"))?;

    let rows = stmt
        .query_map(params![student_name], |row| {
            Ok(CheckoutRow {
                student_name: row.get(0)?,
                student_id: row.get(1)?,
                student_email: row.get(2)?,
                isbn: row.get(3)?,
                title: row.get(4)?,
                author: row.get(5)?,
            })
        })
        .map_err(|err| classify(err, "failed to load checkouts"))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| classify(err, "failed to collect checkouts"))?;

    Ok(rows)
}
