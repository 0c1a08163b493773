//! Data layer: schema, loading, filtering and aggregation.
//!
//! Architecture:
//! ```text
//!  survey .csv (12 positional columns)
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse file → Dataset (memoized per path)
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  filter   │  country ∧ academic level ∧ gender → FilteredTable
//!   └──────────┘
//!        │
//!        ▼
//!   ┌───────────┐
//!   │ aggregate  │  grouped means, correlation matrix, platform rankings
//!   └───────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │   view    │  DashboardView handed to the UI / JSON export
//!   └──────────┘
//! ```

pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
pub mod view;
