//! Output for the listing commands.

use polars::prelude::DataFrame;

/// Print a listing table under a header.
pub(crate) fn show_list(title: &str, table: &DataFrame) {
    println!("\n{title}");
    println!("{}", "-".repeat(60));

    if table.height() == 0 {
        println!("  (no entries)\n");
        return;
    }

    println!("{table}");
    println!("{} entries\n", table.height());
}
