/// Data layer: the tabular store, CSV I/O, series projection, and region
/// selection.
///
/// Architecture:
/// ```text
///        .csv
///          │
///          ▼
///    ┌──────────┐
///    │  loader   │  parse file → TableStore
///    └──────────┘
///          │
///          ▼
///    ┌───────────┐
///    │ TableStore │  column-major cells + parsed time index
///    └───────────┘
///          │
///          ▼
///    ┌──────────┐
///    │  series   │  project one column → Vec<SeriesPoint>
///    └──────────┘
///          │
///          ▼
///    ┌──────────┐
///    │  select   │  rectangle in plot space → set of timestamps
///    └──────────┘
/// ```
/// Edits flow back into the `TableStore` (`set_values_at`) and out again
/// through `loader::save_csv`.

pub mod error;
pub mod loader;
pub mod model;
pub mod select;
pub mod series;
