//! # In-memory tabular frame
//!
//! The uploaded CSV file is parsed once into a [`TabularFrame`]: the header
//! row, the data cells, and an inferred kind per column. The frame is
//! immutable after parsing; delegates render it into their prompts via
//! [`TabularFrame::render_for_prompt`].

use crate::constants::MAX_PROMPT_ROWS;
use crate::errors::ChatError;
use std::fmt;
use std::io::Read;

/// The narrowest kind that fits every non-empty cell of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Integer,
    Float,
    Boolean,
    Text,
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnKind::Integer => "integer",
            ColumnKind::Float => "float",
            ColumnKind::Boolean => "boolean",
            ColumnKind::Text => "text",
        };
        write!(f, "{name}")
    }
}

/// An immutable, row-major table parsed from CSV.
#[derive(Debug, Clone)]
pub struct TabularFrame {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    kinds: Vec<ColumnKind>,
}

impl TabularFrame {
    /// Parses CSV from a reader, inferring one kind per column.
    ///
    /// Rows with a different field count than the header are rejected by the
    /// CSV reader itself. A file with a header but no data rows is an
    /// [`ChatError::EmptyDataset`] error.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ChatError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers: Vec<String> = csv_reader
            .headers()?
            .iter()
            .map(|h| h.to_string())
            .collect();
        if headers.is_empty() {
            return Err(ChatError::EmptyDataset);
        }

        let mut rows = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            rows.push(record.iter().map(|cell| cell.to_string()).collect());
        }
        if rows.is_empty() {
            return Err(ChatError::EmptyDataset);
        }

        let kinds = infer_kinds(&headers, &rows);
        Ok(Self {
            headers,
            rows,
            kinds,
        })
    }

    /// Parses CSV from an in-memory byte buffer (the upload path).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ChatError> {
        Self::from_reader(bytes)
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn kinds(&self) -> &[ColumnKind] {
        &self.kinds
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// A one-line schema summary, e.g. `name text, age integer`.
    pub fn schema_summary(&self) -> String {
        self.headers
            .iter()
            .zip(&self.kinds)
            .map(|(name, kind)| format!("{name} {kind}"))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Renders the frame as CSV text for inclusion in a prompt, capped at
    /// [`MAX_PROMPT_ROWS`] data rows.
    pub fn render_for_prompt(&self) -> String {
        let mut out = String::new();
        out.push_str(&self.headers.join(","));
        out.push('\n');
        for row in self.rows.iter().take(MAX_PROMPT_ROWS) {
            out.push_str(&row.join(","));
            out.push('\n');
        }
        if self.rows.len() > MAX_PROMPT_ROWS {
            out.push_str(&format!(
                "... ({} more rows omitted)\n",
                self.rows.len() - MAX_PROMPT_ROWS
            ));
        }
        out
    }
}

fn infer_kinds(headers: &[String], rows: &[Vec<String>]) -> Vec<ColumnKind> {
    (0..headers.len())
        .map(|col| {
            let mut kind: Option<ColumnKind> = None;
            for row in rows {
                let Some(cell) = row.get(col) else { continue };
                if cell.is_empty() {
                    continue;
                }
                let cell_kind = kind_of(cell);
                kind = Some(match (kind, cell_kind) {
                    (None, k) => k,
                    (Some(a), b) if a == b => a,
                    // An integer column widens to float, anything else to text.
                    (Some(ColumnKind::Integer), ColumnKind::Float)
                    | (Some(ColumnKind::Float), ColumnKind::Integer) => ColumnKind::Float,
                    _ => ColumnKind::Text,
                });
                if kind == Some(ColumnKind::Text) {
                    break;
                }
            }
            kind.unwrap_or(ColumnKind::Text)
        })
        .collect()
}

fn kind_of(cell: &str) -> ColumnKind {
    if cell.parse::<i64>().is_ok() {
        ColumnKind::Integer
    } else if cell.parse::<f64>().is_ok() {
        ColumnKind::Float
    } else if cell.eq_ignore_ascii_case("true") || cell.eq_ignore_ascii_case("false") {
        ColumnKind::Boolean
    } else {
        ColumnKind::Text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VITALS: &str = "patient,heart_rate,temp,ok\nalice,72,36.6,true\nbob,81,37.1,false\n";

    #[test]
    fn test_parse_and_infer_kinds() {
        let frame = TabularFrame::from_bytes(VITALS.as_bytes()).unwrap();
        assert_eq!(frame.row_count(), 2);
        assert_eq!(frame.column_count(), 4);
        assert_eq!(
            frame.kinds(),
            &[
                ColumnKind::Text,
                ColumnKind::Integer,
                ColumnKind::Float,
                ColumnKind::Boolean,
            ]
        );
        assert_eq!(
            frame.schema_summary(),
            "patient text, heart_rate integer, temp float, ok boolean"
        );
    }

    #[test]
    fn test_integer_column_widens_to_float() {
        let frame = TabularFrame::from_bytes("v\n1\n2.5\n".as_bytes()).unwrap();
        assert_eq!(frame.kinds(), &[ColumnKind::Float]);
    }

    #[test]
    fn test_empty_cells_are_skipped_during_inference() {
        let frame = TabularFrame::from_bytes("v,w\n,x\n3,y\n".as_bytes()).unwrap();
        assert_eq!(frame.kinds(), &[ColumnKind::Integer, ColumnKind::Text]);
    }

    #[test]
    fn test_header_only_file_is_rejected() {
        let err = TabularFrame::from_bytes("a,b,c\n".as_bytes()).unwrap_err();
        assert!(matches!(err, ChatError::EmptyDataset));
    }

    #[test]
    fn test_ragged_row_is_a_parse_error() {
        let err = TabularFrame::from_bytes("a,b\n1,2,3\n".as_bytes()).unwrap_err();
        assert!(matches!(err, ChatError::Csv(_)));
    }

    #[test]
    fn test_render_for_prompt_includes_header_and_rows() {
        let frame = TabularFrame::from_bytes(VITALS.as_bytes()).unwrap();
        let rendered = frame.render_for_prompt();
        assert!(rendered.starts_with("patient,heart_rate,temp,ok\n"));
        assert!(rendered.contains("alice,72,36.6,true"));
    }
}
