//! Health Analysis
//!
//! Overdue and stagnant detection, delay-factor learning, completion
//! projection and resource over-allocation over one project snapshot.
//!
//! Every computation takes the reference date as an argument; nothing in
//! this crate reads the wall clock.

#![warn(missing_docs)]

pub mod error;
pub mod schedule;
pub mod health;
pub mod estimator;
pub mod allocation;
pub mod analyzer;

pub use error::{DataIntegrityError, Metric, TaskField};
pub use schedule::{days_between, Checked};
pub use health::{overdue_tasks, overdue_tasks_checked, stagnant_tasks};
pub use estimator::{
    average_delay_factor, average_delay_factor_checked, estimate_projected_completion_date,
    estimate_projected_completion_date_checked, NEUTRAL_DELAY_FACTOR,
};
pub use allocation::{resource_overallocations, resource_overallocations_checked};
pub use analyzer::{AnalysisConfig, HealthAnalyzer, HealthReport};
