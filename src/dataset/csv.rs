//! Row-level parsing for comma-delimited dataset files.
//!
//! Double-quoted fields may contain commas; `""` inside quotes is a literal
//! quote. Numeric cells are trimmed before parsing, text cells are not.

use crate::error::{Error, Result};

/// Splits one line into its cells.
pub fn parse_row(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' => {
                if in_quotes && chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                    continue;
                }
                in_quotes = !in_quotes;
            }
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut current));
            }
            c => current.push(c),
        }
    }
    fields.push(current);
    fields
}

/// Parses cells as `f64`. `row` is only used in the error.
pub fn parse_floats(cells: &[String], row: usize) -> Result<Vec<f64>> {
    cells.iter()
        .map(|c| {
            c.trim().parse::<f64>().map_err(|_| Error::Csv {
                row,
                message: format!("'{}' is not a valid number", c),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_plain_and_quoted_cells() {
        assert_eq!(parse_row("5.1,3.5,setosa"), vec!["5.1", "3.5", "setosa"]);
        assert_eq!(parse_row(r#"1,"a,b","say ""hi""""#), vec!["1", "a,b", r#"say "hi""#]);
        assert_eq!(parse_row(""), vec![""]);
    }

    #[test]
    fn bad_number_reports_row() {
        let cells = vec!["1.0".to_owned(), "x".to_owned()];
        match parse_floats(&cells, 7) {
            Err(Error::Csv { row, message }) => {
                assert_eq!(row, 7);
                assert!(message.contains("'x'"));
            }
            other => panic!("unexpected: {:?}", other),
        }
    }
}
