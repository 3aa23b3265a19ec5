use std::collections::BTreeSet;

use chrono::NaiveDateTime;

use super::series::SeriesPoint;

// ---------------------------------------------------------------------------
// Region selector: rectangle in plot space → subset of index timestamps
// ---------------------------------------------------------------------------

/// Selection mode.  While `Inert`, drag gestures compute nothing; transitions
/// happen only through [`RegionSelector::arm`] / [`RegionSelector::disarm`],
/// driven by the shell's "Select points" toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectorState {
    #[default]
    Inert,
    Armed,
}

/// A rectangle corner in plot coordinates: time on x, parameter value on y.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Corner {
    pub ts: NaiveDateTime,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RegionSelector {
    state: SelectorState,
}

impl RegionSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arm(&mut self) {
        self.state = SelectorState::Armed;
    }

    pub fn disarm(&mut self) {
        self.state = SelectorState::Inert;
    }

    pub fn is_armed(&self) -> bool {
        self.state == SelectorState::Armed
    }

    /// Timestamps of the view's points inside the rectangle spanned by the
    /// two corners.
    ///
    /// Corners may arrive in any order (drag direction is unconstrained);
    /// bounds are inclusive on both axes, so boundary points count and a
    /// zero-span rectangle still selects points exactly on it.  Points
    /// without a numeric value can never satisfy the y bound and are
    /// excluded.  Returns the empty set while inert.
    pub fn select(
        &self,
        view: &[SeriesPoint],
        corner1: Corner,
        corner2: Corner,
    ) -> BTreeSet<NaiveDateTime> {
        if !self.is_armed() {
            return BTreeSet::new();
        }

        let (x_lo, x_hi) = (
            corner1.ts.min(corner2.ts),
            corner1.ts.max(corner2.ts),
        );
        let (y_lo, y_hi) = (
            corner1.value.min(corner2.value),
            corner1.value.max(corner2.value),
        );

        view.iter()
            .filter_map(|p| {
                let v = p.value?;
                let inside = x_lo <= p.ts && p.ts <= x_hi && y_lo <= v && v <= y_hi;
                inside.then_some(p.ts)
            })
            .collect()
    }
}
