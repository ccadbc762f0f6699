use crate::cli_args::TableArgs;
use anyhow::Result;
use mdbundle_core::generate_markdown_table;

const DEFAULT_COLUMNS: [&str; 3] = ["Column1", "Column2", "Column3"];

pub fn handle_table_command(args: &TableArgs) -> Result<()> {
    // Shells split on whitespace already; also split each argument on
    // commas so "Name,Age,City" works as a single argument.
    let mut columns: Vec<String> = args
        .columns
        .iter()
        .flat_map(|arg| arg.split([',', ' ', '\t']))
        .filter(|name| !name.is_empty())
        .map(|name| name.to_string())
        .collect();

    if columns.is_empty() {
        columns = DEFAULT_COLUMNS.iter().map(|s| s.to_string()).collect();
    }

    println!("{}", generate_markdown_table(&columns));
    Ok(())
}
