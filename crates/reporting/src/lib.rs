//! Marketing performance reporting — filtering, headline KPIs, per-channel
//! and per-day aggregates, and the dashboard pipeline that ties them together.

pub mod aggregate;
pub mod dashboard;
pub mod filter;
pub mod kpi;
pub mod options;

pub use aggregate::{Aggregator, ChannelSpend, DailyTotals};
pub use dashboard::{DashboardPipeline, DashboardReport};
pub use filter::{DateSelection, Filter};
pub use kpi::KpiCalculator;
pub use options::{FilterOptions, FilterQuery, ResolvedQuery};
