//! Iteration trace shared between an algorithm and its reporters.
//!
//! Every algorithm declares its own [`Record`] type with a fixed column
//! [header](Record::HEADER). The algorithm appends one record per iteration
//! into a caller-owned [`Trace`] and reporters (tables, plots, animations)
//! read it after the run has finished.

use std::fmt;

use nalgebra::Vector2;

/// A single value in a trace row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cell {
    /// Iteration counter or other index.
    Index(usize),
    /// Real number.
    Real(f64),
    /// Point in the plane.
    Point(Vector2<f64>),
    /// Point in the plane with its function value.
    Sample(Vector2<f64>, f64),
    /// Name of an action performed in the iteration.
    Label(&'static str),
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Index(i) => write!(f, "{}", i),
            Cell::Real(x) => write!(f, "{}", x),
            Cell::Point(x) => write!(f, "({:.3}, {:.3})", x[0], x[1]),
            Cell::Sample(x, fx) => write!(f, "({:.3}, {:.3}; {:.3})", x[0], x[1], fx),
            Cell::Label(label) => f.write_str(label),
        }
    }
}

/// Per-iteration record of an algorithm.
///
/// The number of [cells](Record::cells) must be equal to the length of
/// [`HEADER`](Record::HEADER) for every record.
pub trait Record {
    /// Column names.
    const HEADER: &'static [&'static str];

    /// Values of the columns, in the order of the header.
    fn cells(&self) -> Vec<Cell>;
}

/// Append-only sequence of records of a single run.
#[derive(Debug, Clone, PartialEq)]
pub struct Trace<R> {
    records: Vec<R>,
}

impl<R> Default for Trace<R> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<R> Trace<R> {
    /// Creates an empty trace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record.
    pub fn push(&mut self, record: R) {
        self.records.push(record);
    }

    /// Gets the number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Checks whether there are no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates over the records in the order they were appended.
    pub fn iter(&self) -> std::slice::Iter<'_, R> {
        self.records.iter()
    }

    /// Gets the last record.
    pub fn last(&self) -> Option<&R> {
        self.records.last()
    }

    /// Gets all records.
    pub fn records(&self) -> &[R] {
        &self.records
    }
}

impl<R: Record> Trace<R> {
    /// Gets the column names.
    pub fn header(&self) -> &'static [&'static str] {
        R::HEADER
    }

    /// Converts the trace into a type-erased table.
    pub fn to_table(&self) -> Table {
        Table {
            header: R::HEADER,
            rows: self.records.iter().map(Record::cells).collect(),
        }
    }
}

impl<'a, R> IntoIterator for &'a Trace<R> {
    type Item = &'a R;
    type IntoIter = std::slice::Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Type-erased view of a trace used by reporters.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Column names.
    pub header: &'static [&'static str],
    /// Rows with exactly `header.len()` cells each.
    pub rows: Vec<Vec<Cell>>,
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.header.join("\t"))?;

        for row in &self.rows {
            let mut first = true;
            for cell in row {
                if !first {
                    f.write_str("\t")?;
                }
                write!(f, "{}", cell)?;
                first = false;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}
