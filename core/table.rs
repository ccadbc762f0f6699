//! Markdown table skeleton generation.

/// Builds a three-row Markdown table skeleton from column names: header,
/// separator (dash run matching each name's character count) and one empty
/// data row.
pub fn generate_markdown_table(columns: &[String]) -> String {
    let header: String = columns
        .iter()
        .map(|name| format!(" {} ", name))
        .collect::<Vec<_>>()
        .join("|");
    let separator: String = columns
        .iter()
        .map(|name| format!(" {} ", "-".repeat(name.chars().count())))
        .collect::<Vec<_>>()
        .join("|");
    let empty_row: String = columns
        .iter()
        .map(|name| " ".repeat(name.chars().count() + 2))
        .collect::<Vec<_>>()
        .join("|");

    [header, separator, empty_row]
        .map(|row| format!("|{}|", row))
        .join("\n")
}
