use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use super::error::DataError;

// ---------------------------------------------------------------------------
// Cell – a single value in the table
// ---------------------------------------------------------------------------

/// One cell of the loaded table.  The missing marker is an explicit variant,
/// never a NaN, so edits and comparisons stay well-defined.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Number(f64),
    Text(String),
    Missing,
}

impl Cell {
    /// Type a raw CSV field: empty → missing, numeric → number, else text.
    pub fn from_field(s: &str) -> Cell {
        if s.is_empty() {
            return Cell::Missing;
        }
        if let Ok(v) = s.parse::<f64>() {
            return Cell::Number(v);
        }
        Cell::Text(s.to_string())
    }

    /// The numeric value, if this cell carries one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Number(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Number(v) => write!(f, "{v}"),
            Cell::Text(s) => write!(f, "{s}"),
            Cell::Missing => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// TableStore – the loaded CSV, column-major
// ---------------------------------------------------------------------------

/// One named column in file order.
#[derive(Debug, Clone)]
pub struct Column {
    pub name: String,
    pub cells: Vec<Cell>,
}

/// The parsed time index: which column it came from and one timestamp per row.
#[derive(Debug, Clone)]
pub struct TimeIndex {
    pub column: String,
    pub timestamps: Vec<NaiveDateTime>,
}

/// In-memory column-major table with an optional designated time index.
///
/// The index column's cells stay in the store (they are serialized back in
/// place on save); `TimeIndex` holds the parsed timestamps alongside.
#[derive(Debug, Clone, Default)]
pub struct TableStore {
    columns: Vec<Column>,
    index: Option<TimeIndex>,
}

impl TableStore {
    /// Build a store from header names and row-major records.
    /// Caller guarantees every record has `headers.len()` fields.
    pub fn from_rows(headers: Vec<String>, rows: Vec<Vec<Cell>>) -> TableStore {
        let mut columns: Vec<Column> = headers
            .into_iter()
            .map(|name| Column {
                name,
                cells: Vec::with_capacity(rows.len()),
            })
            .collect();
        for row in rows {
            for (col, cell) in columns.iter_mut().zip(row) {
                col.cells.push(cell);
            }
        }
        TableStore {
            columns,
            index: None,
        }
    }

    /// Column names in file order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn n_rows(&self) -> usize {
        self.columns.first().map_or(0, |c| c.cells.len())
    }

    /// The cells of a named column.
    pub fn get_column(&self, name: &str) -> Result<&[Cell], DataError> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.cells.as_slice())
            .ok_or_else(|| DataError::ColumnNotFound(name.to_string()))
    }

    /// The current time index, if a date column has been selected.
    pub fn index(&self) -> Option<&TimeIndex> {
        self.index.as_ref()
    }

    /// Parse the named column as timestamps and establish it as the index.
    ///
    /// All-or-nothing: a single unparsable cell fails the whole operation and
    /// leaves any previous index untouched.  No-op if `name` is already the
    /// current index column.
    pub fn set_index_column(&mut self, name: &str) -> Result<(), DataError> {
        if self.index.as_ref().is_some_and(|ix| ix.column == name) {
            return Ok(());
        }
        let cells = self.get_column(name)?;
        let mut timestamps = Vec::with_capacity(cells.len());
        for (row, cell) in cells.iter().enumerate() {
            let text = cell.to_string();
            let ts = parse_timestamp(&text).ok_or_else(|| DataError::Timestamp {
                column: name.to_string(),
                row,
                value: text.clone(),
            })?;
            timestamps.push(ts);
        }
        self.index = Some(TimeIndex {
            column: name.to_string(),
            timestamps,
        });
        Ok(())
    }

    /// Overwrite with `Cell::Missing` every row of `column` whose index
    /// timestamp is in `indices`.  Timestamps absent from the store are
    /// silently ignored.  Returns the number of cells overwritten.
    pub fn set_values_at(
        &mut self,
        indices: &BTreeSet<NaiveDateTime>,
        column: &str,
    ) -> Result<usize, DataError> {
        let Some(ix) = &self.index else {
            return Err(DataError::NoIndex);
        };
        let timestamps = ix.timestamps.clone();
        let col = self
            .columns
            .iter_mut()
            .find(|c| c.name == column)
            .ok_or_else(|| DataError::ColumnNotFound(column.to_string()))?;

        let mut overwritten = 0;
        for (cell, ts) in col.cells.iter_mut().zip(&timestamps) {
            if indices.contains(ts) {
                *cell = Cell::Missing;
                overwritten += 1;
            }
        }
        Ok(overwritten)
    }
}

// ---------------------------------------------------------------------------
// Timestamp parsing
// ---------------------------------------------------------------------------

/// Datetime layouts probed after RFC 3339, most specific first.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
];

/// Date-only layouts, interpreted as midnight.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y"];

/// Permissively parse one timestamp string.  First matching layout wins;
/// RFC 3339 offsets are dropped to the naive local time they annotate.
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> NaiveDateTime {
        parse_timestamp(s).expect("test timestamp must parse")
    }

    fn sample_store() -> TableStore {
        TableStore::from_rows(
            vec!["date".into(), "V".into()],
            vec![
                vec![Cell::Text("2024-01-01".into()), Cell::Number(10.0)],
                vec![Cell::Text("2024-01-02".into()), Cell::Number(20.0)],
                vec![Cell::Text("2024-01-03".into()), Cell::Number(30.0)],
            ],
        )
    }

    #[test]
    fn parse_timestamp_accepts_common_layouts() {
        assert!(parse_timestamp("2024-01-02").is_some());
        assert!(parse_timestamp("2024/01/02").is_some());
        assert!(parse_timestamp("02/01/2024").is_some());
        assert!(parse_timestamp("2024-01-02 03:04:05").is_some());
        assert!(parse_timestamp("2024-01-02T03:04:05.250").is_some());
        assert!(parse_timestamp("2024-01-02T03:04:05+01:00").is_some());
        assert!(parse_timestamp("not a date").is_none());
        assert!(parse_timestamp("").is_none());
    }

    #[test]
    fn date_only_layouts_mean_midnight() {
        assert_eq!(ts("2024-01-02"), ts("2024-01-02 00:00"));
    }

    #[test]
    fn set_index_column_parses_and_indexes() {
        let mut store = sample_store();
        store.set_index_column("date").unwrap();
        let ix = store.index().unwrap();
        assert_eq!(ix.column, "date");
        assert_eq!(
            ix.timestamps,
            vec![ts("2024-01-01"), ts("2024-01-02"), ts("2024-01-03")]
        );
    }

    #[test]
    fn set_index_column_is_all_or_nothing() {
        let mut store = TableStore::from_rows(
            vec!["date".into(), "V".into()],
            vec![
                vec![Cell::Text("2024-01-01".into()), Cell::Number(1.0)],
                vec![Cell::Text("garbage".into()), Cell::Number(2.0)],
            ],
        );
        let err = store.set_index_column("date").unwrap_err();
        assert!(matches!(err, DataError::Timestamp { row: 1, .. }));
        assert!(store.index().is_none());
    }

    #[test]
    fn set_index_column_unknown_column() {
        let mut store = sample_store();
        assert!(matches!(
            store.set_index_column("nope"),
            Err(DataError::ColumnNotFound(_))
        ));
    }

    #[test]
    fn reindexing_replaces_the_index() {
        let mut store = TableStore::from_rows(
            vec!["a".into(), "b".into()],
            vec![vec![
                Cell::Text("2024-01-01".into()),
                Cell::Text("2025-06-01".into()),
            ]],
        );
        store.set_index_column("a").unwrap();
        store.set_index_column("b").unwrap();
        let ix = store.index().unwrap();
        assert_eq!(ix.column, "b");
        assert_eq!(ix.timestamps, vec![ts("2025-06-01")]);
    }

    #[test]
    fn set_values_at_overwrites_and_ignores_unknown_timestamps() {
        let mut store = sample_store();
        store.set_index_column("date").unwrap();

        let mut sel = BTreeSet::new();
        sel.insert(ts("2024-01-02"));
        sel.insert(ts("1999-12-31")); // not in the store
        let n = store.set_values_at(&sel, "V").unwrap();
        assert_eq!(n, 1);

        assert_eq!(
            store.get_column("V").unwrap(),
            &[Cell::Number(10.0), Cell::Missing, Cell::Number(30.0)]
        );
    }

    #[test]
    fn set_values_at_is_idempotent() {
        let mut store = sample_store();
        store.set_index_column("date").unwrap();
        let sel: BTreeSet<_> = [ts("2024-01-01"), ts("2024-01-03")].into();

        store.set_values_at(&sel, "V").unwrap();
        let once = store.get_column("V").unwrap().to_vec();
        let n = store.set_values_at(&sel, "V").unwrap();
        assert_eq!(n, 2); // still overwrites, with the same result
        assert_eq!(store.get_column("V").unwrap(), once.as_slice());
    }

    #[test]
    fn set_values_at_requires_an_index() {
        let mut store = sample_store();
        let sel: BTreeSet<_> = [ts("2024-01-01")].into();
        assert!(matches!(
            store.set_values_at(&sel, "V"),
            Err(DataError::NoIndex)
        ));
    }

    #[test]
    fn empty_selection_is_a_no_op() {
        let mut store = sample_store();
        store.set_index_column("date").unwrap();
        let n = store.set_values_at(&BTreeSet::new(), "V").unwrap();
        assert_eq!(n, 0);
        assert_eq!(store.get_column("V").unwrap()[0], Cell::Number(10.0));
    }

    #[test]
    fn cell_from_field_typing_probe() {
        assert_eq!(Cell::from_field(""), Cell::Missing);
        assert_eq!(Cell::from_field("3.5"), Cell::Number(3.5));
        assert_eq!(Cell::from_field("-7"), Cell::Number(-7.0));
        assert_eq!(Cell::from_field("hello"), Cell::Text("hello".into()));
    }
}
