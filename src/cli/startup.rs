//! Lines printed once the store is open, before the menu.

use std::io::{self, BufRead, Write};
use std::path::Path;

use super::console::Console;
use crate::db::{SchemaReport, StoreOrigin};

/// Tell the user which store is in use and, when tables were just created,
/// confirm each one and list any that failed.
pub fn announce_store<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    path: &Path,
    origin: &StoreOrigin,
) -> io::Result<()> {
    match origin {
        StoreOrigin::Existing => {
            console.line(&format!("Opened library store at {}", path.display()))
        }
        StoreOrigin::Bootstrapped(report) => {
            console.line(&format!("Created new library store at {}", path.display()))?;
            schema_lines(console, report)
        }
        StoreOrigin::Repaired(report) => {
            console.line(&format!(
                "Opened library store at {} and created missing tables",
                path.display()
            ))?;
            schema_lines(console, report)
        }
    }
}

fn schema_lines<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    report: &SchemaReport,
) -> io::Result<()> {
    for message in report.messages() {
        console.success(&message)?;
    }
    for failure in &report.failed {
        console.error(&failure.to_string())?;
    }
    Ok(())
}
