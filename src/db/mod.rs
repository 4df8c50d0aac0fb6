//! Persistence module split across logical submodules: `connection` opens the
//! store, `schema` and `seed` manage tables and sample rows, and the remaining
//! modules hold one query family each.

mod books;
mod checkouts;
mod connection;
mod schema;
mod seed;
mod students;

pub use books::{add_book, list_books, list_by_department};
pub use checkouts::find_checkouts_by_student;
pub use connection::{open, StoreOrigin};
pub use schema::{
    bootstrap, count_rows, create_all, create_tables, drop_all, missing_tables, SchemaReport,
    Table,
};
pub use seed::{reset, ResetSummary};
pub use students::add_student;
