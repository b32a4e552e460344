/// Data layer: core types, loading, aggregation and panel selection.
///
/// Architecture:
/// ```text
///  conditions.txt      df.csv
///        │               │
///        ▼               ▼
///   ┌────────────────────────┐
///   │         loader          │  parse files → Conditions, TimeSeriesTable
///   └────────────────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ aggregate │  replicate blocks → ConditionStats (mean, population std)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  select   │  controls → reference traces, remaining → panels
///   └──────────┘
/// ```

pub mod aggregate;
pub mod loader;
pub mod model;
pub mod select;
