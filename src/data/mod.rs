/// Data layer: synthetic tables, thresholds, aggregation and chart shaping.
///
/// Architecture:
/// ```text
///   seed + value range
///        │
///        ▼
///   ┌───────────┐
///   │ generator │  draw uniform measures → Table
///   └───────────┘
///        │
///        ├──────────────────────┐
///        ▼                      ▼
///   ┌──────────┐          ┌───────────┐
///   │  filter  │          │ aggregate │  sum per bucket / category
///   └──────────┘          └───────────┘
///        │                      │
///        ▼                      ▼
///   flagged rows          ┌────────────┐
///   (table, export)       │ projection │  (domain, range) pairs → chart
///                         └────────────┘
/// ```

pub mod aggregate;
pub mod export;
pub mod filter;
pub mod generator;
pub mod model;
pub mod projection;
