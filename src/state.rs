use std::collections::BTreeSet;

use chrono::NaiveDateTime;

use crate::data::model::TableStore;
use crate::data::select::RegionSelector;
use crate::data::series::{self, SeriesPoint};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.  One instance lives for the
/// whole process and owns the one loaded store.
#[derive(Default)]
pub struct AppState {
    /// Loaded table (None until the user loads a file).
    pub store: Option<TableStore>,

    /// Date-column picker choice.
    pub date_column: Option<String>,

    /// Parameter-column picker choice.
    pub parameter_column: Option<String>,

    /// The parameter column currently on screen; set by a successful Plot
    /// action, cleared on load.
    pub plotted_parameter: Option<String>,

    /// Rectangle-selection mode toggle.
    pub selector: RegionSelector,

    /// Pending selection; replaced wholesale by each completed drag.
    pub selection: BTreeSet<NaiveDateTime>,

    /// Plot-space anchor of an in-progress selection drag.
    pub drag_start: Option<(f64, f64)>,

    /// Status / error message shown in the top bar.
    pub status_message: Option<String>,
}

impl AppState {
    /// Ingest a newly loaded store and reset everything derived from the
    /// previous one.  Column pickers default to the first two columns.
    pub fn set_store(&mut self, store: TableStore) {
        {
            let mut names = store.column_names();
            let date_column = names.next().map(str::to_string);
            self.parameter_column =
                names.next().map(str::to_string).or_else(|| date_column.clone());
            self.date_column = date_column;
        }

        self.plotted_parameter = None;
        self.selection.clear();
        self.drag_start = None;
        self.store = Some(store);
        self.status_message = None;
    }

    /// The series currently on screen, re-derived from the store each frame
    /// so edits show up immediately.
    pub fn current_view(&self) -> Option<Vec<SeriesPoint>> {
        let store = self.store.as_ref()?;
        let parameter = self.plotted_parameter.as_deref()?;
        series::project(store, parameter).ok()
    }

    /// Plot action: establish the chosen date column as the index, validate
    /// the parameter projection, and record what is being plotted.
    pub fn plot(&mut self) {
        let (Some(date), Some(parameter)) =
            (self.date_column.clone(), self.parameter_column.clone())
        else {
            return;
        };
        let Some(store) = self.store.as_mut() else {
            return;
        };

        if let Err(e) = store.set_index_column(&date) {
            log::error!("failed to index by '{date}': {e}");
            self.status_message = Some(format!("Error: {e}"));
            return;
        }
        if let Err(e) = series::project(store, &parameter) {
            log::error!("failed to project '{parameter}': {e}");
            self.status_message = Some(format!("Error: {e}"));
            return;
        }

        self.plotted_parameter = Some(parameter);
        self.selection.clear();
        self.drag_start = None;
        self.status_message = None;
    }

    /// Arm or disarm the region selector.  The pending selection survives
    /// disarming; it only clears when applied or replaced.
    pub fn toggle_selector(&mut self) {
        if self.selector.is_armed() {
            self.selector.disarm();
            self.drag_start = None;
        } else {
            self.selector.arm();
        }
    }

    /// Edit action: overwrite every selected point of the plotted column
    /// with the missing marker, then discard the selection so a stale set
    /// cannot be reapplied.  Empty selection is a no-op.
    pub fn apply_selection(&mut self) {
        if self.selection.is_empty() {
            return;
        }
        let (Some(store), Some(parameter)) =
            (self.store.as_mut(), self.plotted_parameter.as_deref())
        else {
            return;
        };

        match store.set_values_at(&self.selection, parameter) {
            Ok(n) => {
                log::info!("set {n} points of '{parameter}' to missing");
                self.status_message = Some(format!("{n} points set to missing"));
                self.selection.clear();
            }
            Err(e) => {
                log::error!("edit failed: {e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }
}
