//! Budget types and data structures

use crate::core::types::Usage;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Spend ceilings for one provider, in cents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetConfig {
    pub daily_limit_cents: u64,
    pub per_request_limit_cents: u64,
}

impl BudgetConfig {
    pub fn new(daily_limit_cents: u64, per_request_limit_cents: u64) -> Self {
        Self {
            daily_limit_cents,
            per_request_limit_cents,
        }
    }
}

/// Actual usage of one completed call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsageRecord {
    pub provider: String,
    pub model: String,
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
    pub cost_cents: u64,
    pub timestamp: DateTime<Utc>,
}

impl TokenUsageRecord {
    /// Record stamped with the current time
    pub fn new(
        provider: impl Into<String>,
        model: impl Into<String>,
        usage: Usage,
        cost_cents: u64,
    ) -> Self {
        Self {
            provider: provider.into(),
            model: model.into(),
            prompt_tokens: usage.prompt_tokens,
            completion_tokens: usage.completion_tokens,
            total_tokens: usage.total_tokens,
            cost_cents,
            timestamp: Utc::now(),
        }
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }
}

/// Outcome of a pre-flight budget check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetDecision {
    Allowed,
    /// The estimate alone is above the per-request ceiling
    PerRequestExceeded { estimated_cents: u64, limit_cents: u64 },
    /// The estimate is above the cost cap carried by the request
    RequestCapExceeded { estimated_cents: u64, cap_cents: u64 },
    /// Today's spend plus the estimate is above the daily ceiling
    DailyExceeded {
        spent_cents: u64,
        estimated_cents: u64,
        limit_cents: u64,
    },
}

impl BudgetDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, BudgetDecision::Allowed)
    }
}

impl std::fmt::Display for BudgetDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BudgetDecision::Allowed => write!(f, "allowed"),
            BudgetDecision::PerRequestExceeded {
                estimated_cents,
                limit_cents,
            } => write!(
                f,
                "estimated {}c exceeds per-request limit {}c",
                estimated_cents, limit_cents
            ),
            BudgetDecision::RequestCapExceeded {
                estimated_cents,
                cap_cents,
            } => write!(
                f,
                "estimated {}c exceeds request cost cap {}c",
                estimated_cents, cap_cents
            ),
            BudgetDecision::DailyExceeded {
                spent_cents,
                estimated_cents,
                limit_cents,
            } => write!(
                f,
                "spent {}c + estimated {}c exceeds daily limit {}c",
                spent_cents, estimated_cents, limit_cents
            ),
        }
    }
}

/// Aggregated usage for one provider on one UTC day
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyUsage {
    pub cost_cents: u64,
    pub tokens: u64,
    pub request_count: u64,
}

impl DailyUsage {
    pub(super) fn add(&mut self, record: &TokenUsageRecord) {
        self.cost_cents = self.cost_cents.saturating_add(record.cost_cents);
        self.tokens = self.tokens.saturating_add(record.total_tokens as u64);
        self.request_count = self.request_count.saturating_add(1);
    }
}

/// Today's usage for one provider, for dashboards
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageStats {
    pub provider: String,
    pub date: NaiveDate,
    pub daily_cost_cents: u64,
    pub daily_tokens: u64,
    /// `None` when the provider has no budget
    pub remaining_daily_cents: Option<u64>,
    pub request_count: u64,
}
