//! Output for the data command.

use bea_client::BeaData;
use polars::prelude::DataFrame;

/// Print the data table, and with `all` the notes and dimensions.
pub(crate) fn show_data(dataset: &str, result: &BeaData, all: bool) {
    println!("\n{dataset}: {} rows", result.data.height());
    if let Some(value) = result.value_dimension() {
        println!("Value column: {value}");
    }
    println!("{}", result.data);

    if all {
        section("Dimensions", &result.dimensions);
        section("Notes", &result.notes);
    } else if result.notes.height() > 0 {
        println!("{} notes (use --all to show)", result.notes.height());
    }
    println!();
}

fn section(name: &str, table: &DataFrame) {
    println!("\n{name}:");
    if table.height() == 0 {
        println!("  (none)");
    } else {
        println!("{table}");
    }
}
