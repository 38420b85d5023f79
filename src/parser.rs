//! Worksheet parser for survey exports.
//!
//! Reads the first worksheet of a workbook (format detected from the bytes),
//! drops worksheet row 1 (the header) and blank rows, and keeps every
//! remaining row with its cells aligned to absolute 1-based column numbers.

use anyhow::{Context, Result};
use calamine::{Data, Range, Reader, open_workbook_auto_from_rs};
use std::fmt;
use std::io::Cursor;
use tracing::{debug, warn};

/// A single worksheet cell, reduced to the kinds scoring cares about.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Number(f64),
    Bool(bool),
    Text(String),
    /// Dates, times and durations.
    Temporal(String),
    /// Spreadsheet error values such as `#DIV/0!`.
    Error(String),
}

impl CellValue {
    /// Whether the cell holds anything meaningful: empty cells, zero, empty
    /// text and `false` all count as blank.
    pub fn is_truthy(&self) -> bool {
        match self {
            CellValue::Empty => false,
            CellValue::Number(n) => *n != 0.0,
            CellValue::Bool(b) => *b,
            CellValue::Text(s) => !s.is_empty(),
            CellValue::Temporal(_) | CellValue::Error(_) => true,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            CellValue::Empty => "empty",
            CellValue::Number(_) => "number",
            CellValue::Bool(_) => "boolean",
            CellValue::Text(_) => "text",
            CellValue::Temporal(_) => "date/time",
            CellValue::Error(_) => "error",
        }
    }
}

impl From<&Data> for CellValue {
    fn from(cell: &Data) -> Self {
        match cell {
            Data::Empty => CellValue::Empty,
            Data::Int(i) => CellValue::Number(*i as f64),
            Data::Float(f) => CellValue::Number(*f),
            Data::Bool(b) => CellValue::Bool(*b),
            Data::String(s) => CellValue::Text(s.clone()),
            Data::Error(e) => CellValue::Error(e.to_string()),
            other => CellValue::Temporal(other.to_string()),
        }
    }
}

/// Why a cell could not be read as a number.
#[derive(Debug, Clone, PartialEq)]
pub enum CellError {
    /// The column lies outside the worksheet's used range.
    OutOfRange { column: usize },
    /// The cell holds a non-numeric value.
    NotNumeric { column: usize, kind: &'static str },
    /// The cell holds a spreadsheet error value.
    ErrorValue { column: usize, value: String },
}

impl fmt::Display for CellError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellError::OutOfRange { column } => write!(f, "column {column} is out of range"),
            CellError::NotNumeric { column, kind } => {
                write!(f, "column {column} holds a {kind} value")
            }
            CellError::ErrorValue { column, value } => {
                write!(f, "column {column} holds error value {value}")
            }
        }
    }
}

impl std::error::Error for CellError {}

/// One survey response: a worksheet row below the header.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseRow {
    number: usize,
    cells: Vec<CellValue>,
}

impl ResponseRow {
    /// `number` is the 1-based worksheet row; `cells[0]` is column 1.
    pub fn new(number: usize, cells: Vec<CellValue>) -> Self {
        Self { number, cells }
    }

    /// 1-based worksheet row number.
    pub fn number(&self) -> usize {
        self.number
    }

    pub fn cells(&self) -> &[CellValue] {
        &self.cells
    }

    pub fn has_content(&self) -> bool {
        self.cells.iter().any(CellValue::is_truthy)
    }

    /// Returns the cell at a 1-based column.
    pub fn cell(&self, column: usize) -> Result<&CellValue, CellError> {
        column
            .checked_sub(1)
            .and_then(|idx| self.cells.get(idx))
            .ok_or(CellError::OutOfRange { column })
    }

    /// Reads a 1-based column as a number. Blank cells read as `0.0`.
    pub fn read_number(&self, column: usize) -> Result<f64, CellError> {
        match self.cell(column)? {
            cell if !cell.is_truthy() => Ok(0.0),
            CellValue::Number(n) => Ok(*n),
            // `TRUE` is not a rating of 1; checkbox columns stay out of scores.
            CellValue::Bool(_) => Err(CellError::NotNumeric {
                column,
                kind: "boolean",
            }),
            CellValue::Error(value) => Err(CellError::ErrorValue {
                column,
                value: value.clone(),
            }),
            other => Err(CellError::NotNumeric {
                column,
                kind: other.kind(),
            }),
        }
    }
}

/// Parses workbook bytes into response rows, top to bottom.
///
/// # Errors
///
/// Returns an error if the bytes are not a readable spreadsheet or the first
/// worksheet cannot be decoded.
#[tracing::instrument(skip(bytes), fields(bytes = bytes.len()))]
pub fn parse_rows(bytes: &[u8]) -> Result<Vec<ResponseRow>> {
    let mut workbook =
        open_workbook_auto_from_rs(Cursor::new(bytes.to_vec())).context("opening workbook")?;

    let range = match workbook.worksheet_range_at(0) {
        Some(range) => range.context("reading first worksheet")?,
        None => {
            warn!("Workbook contains no worksheets");
            return Ok(Vec::new());
        }
    };

    let rows = rows_from_range(&range);
    debug!(rows = rows.len(), "Worksheet parsed");
    Ok(rows)
}

fn rows_from_range(range: &Range<Data>) -> Vec<ResponseRow> {
    let Some((first_row, first_col)) = range.start() else {
        return Vec::new();
    };

    range
        .rows()
        .enumerate()
        .filter_map(|(offset, cells)| {
            // worksheet row 1 is the header even when blank
            let index = first_row as usize + offset;
            if index == 0 {
                return None;
            }

            let mut values = vec![CellValue::Empty; first_col as usize];
            values.extend(cells.iter().map(CellValue::from));

            let row = ResponseRow::new(index + 1, values);
            row.has_content().then_some(row)
        })
        .collect()
}
