//! Per-provider spend tracking
//!
//! Spend is accumulated in daily UTC buckets per provider and checked against the
//! provider's daily and per-request ceilings before each call.
//!
//! `check_budget` and `record_usage` are separate steps. Two concurrent calls can
//! both pass the check before either records, so the daily ceiling may be overshot
//! by the in-flight calls' cost under heavy concurrency. A strict guarantee would need
//! a reserve-then-commit step per call.

mod tracker;
mod types;

pub use tracker::{BudgetTracker, RETENTION_DAYS};
pub use types::{BudgetConfig, BudgetDecision, DailyUsage, TokenUsageRecord, UsageStats};
