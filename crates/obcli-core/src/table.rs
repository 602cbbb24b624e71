//! # Table Module
//!
//! Fixed-width text tables for terminal output.
//!
//! Each column is as wide as its widest cell (header included) but never
//! wider than [`MAX_COLUMN_WIDTH`] characters. Longer text is cut and
//! marked with `...`; shorter text is padded so columns line up.
//!
//! ```text
//! AccountId  Currency  Nickname
//! ---------  --------  --------
//! 22289      GBP       Bills
//! 31820      EUR       N/A
//! ```

use serde_json::Value;

/// Widest a column may get, in characters.
pub const MAX_COLUMN_WIDTH: usize = 50;

/// Placeholder for absent or null fields.
pub const MISSING: &str = "N/A";

const ELLIPSIS: &str = "...";
const SEPARATOR: &str = "  ";

/// A header row plus data rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row. Short rows are filled with [`MISSING`], extra cells dropped.
    pub fn push_row(&mut self, mut row: Vec<String>) {
        row.resize(self.headers.len(), MISSING.to_string());
        self.rows.push(row);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Display width of every column.
    pub fn column_widths(&self) -> Vec<usize> {
        self.headers
            .iter()
            .enumerate()
            .map(|(i, header)| {
                let widest_cell = self
                    .rows
                    .iter()
                    .filter_map(|row| row.get(i))
                    .map(|cell| char_len(&clean(cell)))
                    .max()
                    .unwrap_or(0);
                char_len(header).max(widest_cell).min(MAX_COLUMN_WIDTH)
            })
            .collect()
    }

    /// Render header, rule and rows, one line each, newline-terminated.
    pub fn render(&self) -> String {
        let widths = self.column_widths();
        let mut output = String::new();

        push_line(&mut output, self.headers.iter().map(String::as_str), &widths);

        let rule: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
        push_line(&mut output, rule.iter().map(String::as_str), &widths);

        for row in &self.rows {
            push_line(&mut output, row.iter().map(String::as_str), &widths);
        }

        output
    }
}

fn push_line<'a>(output: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let line = cells
        .zip(widths)
        .map(|(cell, &width)| fit(&clean(cell), width))
        .collect::<Vec<_>>()
        .join(SEPARATOR);
    output.push_str(line.trim_end());
    output.push('\n');
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Collapse line breaks and tabs so a cell stays on one line.
fn clean(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_whitespace() { ' ' } else { c })
        .collect()
}

/// Truncate or pad `text` to exactly `width` characters.
fn fit(text: &str, width: usize) -> String {
    let len = char_len(text);
    if len > width {
        if width > ELLIPSIS.len() {
            let kept: String = text.chars().take(width - ELLIPSIS.len()).collect();
            format!("{}{}", kept, ELLIPSIS)
        } else {
            text.chars().take(width).collect()
        }
    } else {
        format!("{}{}", text, " ".repeat(width - len))
    }
}

/// Text for one JSON field.
///
/// - missing or `null` → [`MISSING`]
/// - strings verbatim, numbers and booleans via `to_string`
/// - arrays of scalars joined with `, `
/// - anything else as compact JSON
pub fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => MISSING.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Array(items)) if items.iter().all(is_scalar) => {
            if items.is_empty() {
                MISSING.to_string()
            } else {
                items
                    .iter()
                    .map(|item| cell_text(Some(item)))
                    .collect::<Vec<_>>()
                    .join(", ")
            }
        }
        Some(other) => other.to_string(),
    }
}

fn is_scalar(value: &Value) -> bool {
    !matches!(value, Value::Array(_) | Value::Object(_))
}

// =============================================================================
// TESTS
// =============================================================================
