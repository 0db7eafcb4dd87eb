//! March timing engine.
//!
//! Walks a profiled route once per column, chains columns and series in
//! declaration order, and shapes the result into timelines and summaries.
//! Pure and synchronous; terrain acquisition lives in `march-fetch`.

pub mod column;
pub mod planner;
pub mod report;
pub mod series;
pub mod timeline;

pub use column::compute_column;
pub use march_core as core;
pub use planner::{plan_march, PlanOutput};
pub use series::schedule_march;
pub use timeline::aggregate;
