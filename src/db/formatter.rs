//! Tabular result formatting.

use crate::core::executor::RowSet;

/// Maximum rows an executor should fetch into a [`RowSet`]; anything beyond
/// is reported as truncated instead of held in memory.
pub const MAX_ROWS: usize = 1000;

/// Formats a row set into an aligned text table.
pub fn format_row_set(rows: &RowSet) -> String {
    if rows.rows.is_empty() {
        return "No rows returned".to_string();
    }

    let column_count = rows.columns.len();

    let mut widths: Vec<usize> = rows.columns.iter().map(String::len).collect();
    for row in &rows.rows {
        for (i, value) in row.iter().enumerate().take(column_count) {
            widths[i] = widths[i].max(value.len());
        }
    }

    let mut output = String::new();
    push_row(&mut output, &rows.columns, &widths);

    let total_width: usize =
        widths.iter().sum::<usize>() + 3 * column_count.saturating_sub(1);
    output.push_str(&"-".repeat(total_width));
    output.push('\n');

    for row in &rows.rows {
        push_row(&mut output, row, &widths);
    }

    if rows.truncated {
        output.push_str(&format!("... (results truncated at {MAX_ROWS} rows)"));
    }

    output
}

fn push_row(output: &mut String, row: &[String], widths: &[usize]) {
    for (i, value) in row.iter().enumerate() {
        output.push_str(value);
        output.push_str(&" ".repeat(widths[i] - value.len()));
        if i < row.len() - 1 {
            output.push_str(" | ");
        }
    }
    output.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_set(columns: &[&str], rows: &[&[&str]], truncated: bool) -> RowSet {
        RowSet {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: rows
                .iter()
                .map(|r| r.iter().map(|v| v.to_string()).collect())
                .collect(),
            truncated,
        }
    }

    #[test]
    fn test_empty_result() {
        let rows = row_set(&["ID"], &[], false);
        assert_eq!(format_row_set(&rows), "No rows returned");
    }

    #[test]
    fn test_columns_aligned_to_widest_value() {
        let rows = row_set(
            &["ID", "NAME"],
            &[&["1", "Alice"], &["22", "Bo"]],
            false,
        );
        let output = format_row_set(&rows);
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines[0], "ID | NAME ");
        assert_eq!(lines[1], "----------");
        assert_eq!(lines[2], "1  | Alice");
        assert_eq!(lines[3], "22 | Bo   ");
    }

    #[test]
    fn test_truncation_note() {
        let rows = row_set(&["ID"], &[&["1"]], true);
        let output = format_row_set(&rows);
        assert!(output.ends_with("... (results truncated at 1000 rows)"));
    }
}
