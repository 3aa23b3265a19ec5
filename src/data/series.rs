use chrono::{DateTime, NaiveDateTime};

use super::error::DataError;
use super::model::TableStore;

// ---------------------------------------------------------------------------
// Series view – timestamp/value projection of one column
// ---------------------------------------------------------------------------

/// One plotted point: an index timestamp and the parameter value, if any.
/// Missing and non-numeric cells project to `None` so the plot shows a gap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesPoint {
    pub ts: NaiveDateTime,
    pub value: Option<f64>,
}

/// Project the parameter column against the store's time index.
///
/// Pure function of current store state; recomputed on demand rather than
/// cached, so it always reflects the latest edits.
pub fn project(store: &TableStore, parameter_column: &str) -> Result<Vec<SeriesPoint>, DataError> {
    let index = store.index().ok_or(DataError::NoIndex)?;
    let cells = store.get_column(parameter_column)?;

    Ok(index
        .timestamps
        .iter()
        .zip(cells)
        .map(|(&ts, cell)| SeriesPoint {
            ts,
            value: cell.as_f64(),
        })
        .collect())
}

// ---------------------------------------------------------------------------
// Plot axis conversion
// ---------------------------------------------------------------------------

/// Timestamp → plot-axis value (fractional Unix seconds).
pub fn ts_to_axis(ts: NaiveDateTime) -> f64 {
    ts.and_utc().timestamp_millis() as f64 / 1000.0
}

/// Plot-axis value → timestamp, rounded to the nearest millisecond.
/// `None` for values outside chrono's representable range.
pub fn axis_to_ts(x: f64) -> Option<NaiveDateTime> {
    if !x.is_finite() {
        return None;
    }
    DateTime::from_timestamp_millis((x * 1000.0).round() as i64).map(|dt| dt.naive_utc())
}

/// x-axis tick label: date for midnight-aligned ticks, date + time otherwise.
pub fn format_axis_timestamp(x: f64) -> String {
    match axis_to_ts(x) {
        Some(ts) if ts.and_utc().timestamp_millis() % 86_400_000 == 0 => {
            ts.format("%Y-%m-%d").to_string()
        }
        Some(ts) => ts.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{parse_timestamp, Cell, TableStore};

    fn ts(s: &str) -> NaiveDateTime {
        parse_timestamp(s).expect("test timestamp must parse")
    }

    fn indexed_store() -> TableStore {
        let mut store = TableStore::from_rows(
            vec!["date".into(), "V".into(), "note".into()],
            vec![
                vec![
                    Cell::Text("2024-01-01".into()),
                    Cell::Number(10.0),
                    Cell::Text("a".into()),
                ],
                vec![
                    Cell::Text("2024-01-02".into()),
                    Cell::Missing,
                    Cell::Text("b".into()),
                ],
                vec![
                    Cell::Text("2024-01-03".into()),
                    Cell::Number(30.0),
                    Cell::Text("c".into()),
                ],
            ],
        );
        store.set_index_column("date").unwrap();
        store
    }

    #[test]
    fn project_preserves_missing_values_as_gaps() {
        let view = project(&indexed_store(), "V").unwrap();
        assert_eq!(
            view,
            vec![
                SeriesPoint { ts: ts("2024-01-01"), value: Some(10.0) },
                SeriesPoint { ts: ts("2024-01-02"), value: None },
                SeriesPoint { ts: ts("2024-01-03"), value: Some(30.0) },
            ]
        );
    }

    #[test]
    fn project_maps_text_cells_to_missing() {
        let view = project(&indexed_store(), "note").unwrap();
        assert!(view.iter().all(|p| p.value.is_none()));
    }

    #[test]
    fn project_unknown_column_fails() {
        assert!(matches!(
            project(&indexed_store(), "nope"),
            Err(DataError::ColumnNotFound(_))
        ));
    }

    #[test]
    fn project_requires_an_index() {
        let store = TableStore::from_rows(
            vec!["V".into()],
            vec![vec![Cell::Number(1.0)]],
        );
        assert!(matches!(project(&store, "V"), Err(DataError::NoIndex)));
    }

    #[test]
    fn project_reflects_current_store_state() {
        let mut store = indexed_store();
        let sel: std::collections::BTreeSet<_> = [ts("2024-01-03")].into();
        store.set_values_at(&sel, "V").unwrap();
        let view = project(&store, "V").unwrap();
        assert_eq!(view[2].value, None);
    }

    #[test]
    fn axis_conversion_round_trips_to_the_millisecond() {
        let t = ts("2024-03-15 12:34:56.250");
        assert_eq!(axis_to_ts(ts_to_axis(t)), Some(t));
    }

    #[test]
    fn axis_to_ts_rejects_non_finite() {
        assert_eq!(axis_to_ts(f64::NAN), None);
        assert_eq!(axis_to_ts(f64::INFINITY), None);
    }

    #[test]
    fn midnight_ticks_format_as_dates() {
        let x = ts_to_axis(ts("2024-01-02"));
        assert_eq!(format_axis_timestamp(x), "2024-01-02");
        let x = ts_to_axis(ts("2024-01-02 06:30:00"));
        assert_eq!(format_axis_timestamp(x), "2024-01-02 06:30:00");
    }
}
