//! Data layer: core types, loading, column resolution and series building.
//!
//! Architecture:
//! ```text
//!  .json / .csv / .parquet
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse file → Dataset
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │ resolver  │  Concept → column header (or None)
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  series   │  column → sorted SeriesPoints
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  chart    │  ChartFilters → charts to draw
//!   └──────────┘
//! ```

pub mod barometer;
pub mod chart;
pub mod filter;
pub mod loader;
pub mod model;
pub mod resolver;
pub mod series;
