//! Fixed-width rendering of query results.

use crate::models::{BookRow, CheckoutRow};

/// Truncate `text` to `width` characters so one long title cannot push the
/// remaining columns out of alignment.
fn fit(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        text.chars().take(width.saturating_sub(1)).chain(['~']).collect()
    }
}

/// Book listing: header, rule, then one row per book. A missing department
/// renders as `-` and the derived returned flag as `yes`/`no`.
pub fn book_table(books: &[BookRow]) -> Vec<String> {
    let mut lines = Vec::with_capacity(books.len() + 2);
    lines.push(format!(
        "{:<6} {:<24} {:<20} {:<7} {:<8}",
        "ISBN", "Title", "Author", "Dept ID", "Returned"
    ));
    lines.push("-".repeat(69));

    for book in books {
        let department = book
            .department_id
            .map(|id| id.to_string())
            .unwrap_or_else(|| "-".to_string());
        lines.push(
            format!(
                "{:<6} {:<24} {:<20} {:<7} {:<8}",
                book.isbn,
                fit(&book.title, 24),
                fit(&book.author, 20),
                department,
                if book.returned { "yes" } else { "no" }
            )
            .trim_end()
            .to_string(),
        );
    }

    lines
}

/// "Books rented by a student" report: header, rule, one row per checkout.
pub fn checkout_table(rows: &[CheckoutRow]) -> Vec<String> {
    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(format!(
        "{:<12} {:<10} {:<24} {:<6} {:<24} {:<20}",
        "Name", "Student ID", "Email", "ISBN", "Title", "Author"
    ));
    lines.push("-".repeat(101));

    for row in rows {
        lines.push(
            format!(
                "{:<12} {:<10} {:<24} {:<6} {:<24} {:<20}",
                fit(&row.student_name, 12),
                row.student_id,
                fit(&row.student_email, 24),
                row.isbn,
                fit(&row.title, 24),
                fit(&row.author, 20)
            )
            .trim_end()
            .to_string(),
        );
    }

    lines
}
