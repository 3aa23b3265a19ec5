use std::path::Path;

use super::error::DataError;
use super::model::{Cell, TableStore};

// ---------------------------------------------------------------------------
// CSV load
// ---------------------------------------------------------------------------

/// Load a CSV into a [`TableStore`].
///
/// The header row supplies the column names; there is no fixed schema.  Each
/// field is typed by probe (empty → missing, numeric → number, else text).
/// All-or-nothing: any I/O or CSV error is returned before a store exists,
/// so a failed load never disturbs a previously loaded one.
pub fn load_csv(path: &Path) -> Result<TableStore, DataError> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let row: Vec<Cell> = record.iter().map(Cell::from_field).collect();
        rows.push(row);
    }

    Ok(TableStore::from_rows(headers, rows))
}

// ---------------------------------------------------------------------------
// CSV save
// ---------------------------------------------------------------------------

/// Serialize the store back to CSV in its original column order.
///
/// Missing cells become empty fields; text cells (including the date column)
/// are written verbatim, so unedited rows round-trip unchanged.
pub fn save_csv(store: &TableStore, path: &Path) -> Result<(), DataError> {
    let mut writer = csv::Writer::from_path(path)?;

    writer.write_record(store.column_names())?;
    for row in 0..store.n_rows() {
        let record: Vec<String> = store
            .columns()
            .iter()
            .map(|col| col.cells[row].to_string())
            .collect();
        writer.write_record(&record)?;
    }
    writer.flush().map_err(DataError::Io)?;
    Ok(())
}
