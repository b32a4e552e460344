/// Sheet layer: raw worksheet access and layout discovery.
///
/// ```text
///   .xlsx / .xls / .ods
///        │
///        ▼
///   ┌──────────┐
///   │   grid    │  calamine range → SheetGrid (absolute coordinates)
///   └──────────┘
///        │
///        ├──────────────┬──────────────┐
///        ▼              ▼              ▼
///   ┌──────────┐  ┌──────────┐  ┌──────────┐
///   │ runtime   │  │  locate   │  │  column   │  A1 label arithmetic
///   └──────────┘  └──────────┘  └──────────┘
///        │ reads        │ first row      │
///        ▼              ▼                ▼
///   ┌────────────────────────────────────────┐
///   │ range   CellRange → TimeSeriesTable      │
///   └────────────────────────────────────────┘
/// ```

pub mod column;
pub mod grid;
pub mod locate;
pub mod range;
pub mod runtime;
