//! Row types passed between the store and the terminal. They are plain data
//! holders; persistence lives in `db` and presentation in `cli::format`.

/// Input for `add_student`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStudent {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// Input for `add_book`. A `None` department files the book under no
/// department at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub isbn: i64,
    pub title: String,
    pub author: String,
    pub department_id: Option<i64>,
}

/// One line of the book listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookRow {
    pub isbn: i64,
    pub title: String,
    pub author: String,
    pub department_id: Option<i64>,
    /// Derived from the checkout table: true when no checkout of this book is
    /// still outstanding.
    pub returned: bool,
}

/// One line of the "books rented by a student" report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutRow {
    pub student_name: String,
    pub student_id: i64,
    pub student_email: String,
    pub isbn: i64,
    pub title: String,
    pub author: String,
}
