//! Budget tracker implementation

use super::types::{BudgetConfig, BudgetDecision, DailyUsage, TokenUsageRecord, UsageStats};
use chrono::{DateTime, Days, NaiveDate, Utc};
use dashmap::DashMap;
use parking_lot::Mutex;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// Calendar days of usage kept per provider, today included
pub const RETENTION_DAYS: u64 = 7;

type Ledger = BTreeMap<NaiveDate, DailyUsage>;

/// Tracks spend per provider against configured ceilings
///
/// Providers without a [`BudgetConfig`] are unlimited but still have their usage
/// recorded.
#[derive(Debug, Default)]
pub struct BudgetTracker {
    budgets: HashMap<String, BudgetConfig>,
    ledgers: DashMap<String, Mutex<Ledger>>,
}

impl BudgetTracker {
    pub fn new(budgets: HashMap<String, BudgetConfig>) -> Self {
        Self {
            budgets,
            ledgers: DashMap::new(),
        }
    }

    /// Configured ceilings for a provider
    pub fn budget(&self, provider: &str) -> Option<&BudgetConfig> {
        self.budgets.get(provider)
    }

    /// Point-in-time check; does not reserve anything
    pub fn check_budget(&self, provider: &str, estimated_cents: u64) -> bool {
        self.evaluate(provider, estimated_cents).is_allowed()
    }

    /// Like [`check_budget`](Self::check_budget), reporting which ceiling was hit
    pub fn evaluate(&self, provider: &str, estimated_cents: u64) -> BudgetDecision {
        self.evaluate_on(provider, estimated_cents, Utc::now().date_naive())
    }

    /// Add a completed call's actual cost to its day, then prune old days
    pub fn record_usage(&self, record: TokenUsageRecord) {
        self.record_usage_at(record, Utc::now());
    }

    /// Today's accumulated cost
    pub fn get_daily_cost(&self, provider: &str) -> u64 {
        self.daily_usage(provider, Utc::now().date_naive()).cost_cents
    }

    pub fn get_usage_stats(&self, provider: &str) -> UsageStats {
        self.usage_stats_on(provider, Utc::now().date_naive())
    }

    /// Retained per-day usage, oldest first
    pub fn history(&self, provider: &str) -> Vec<(NaiveDate, DailyUsage)> {
        self.ledgers
            .get(provider)
            .map(|ledger| ledger.lock().iter().map(|(d, u)| (*d, *u)).collect())
            .unwrap_or_default()
    }

    pub(crate) fn evaluate_on(
        &self,
        provider: &str,
        estimated_cents: u64,
        today: NaiveDate,
    ) -> BudgetDecision {
        let Some(budget) = self.budgets.get(provider) else {
            return BudgetDecision::Allowed;
        };

        if estimated_cents > budget.per_request_limit_cents {
            debug!(
                provider,
                estimated_cents,
                limit_cents = budget.per_request_limit_cents,
                "per-request budget exceeded"
            );
            return BudgetDecision::PerRequestExceeded {
                estimated_cents,
                limit_cents: budget.per_request_limit_cents,
            };
        }

        let spent_cents = self.daily_usage(provider, today).cost_cents;
        if spent_cents.saturating_add(estimated_cents) > budget.daily_limit_cents {
            debug!(
                provider,
                spent_cents,
                estimated_cents,
                limit_cents = budget.daily_limit_cents,
                "daily budget exceeded"
            );
            return BudgetDecision::DailyExceeded {
                spent_cents,
                estimated_cents,
                limit_cents: budget.daily_limit_cents,
            };
        }

        BudgetDecision::Allowed
    }

    pub(crate) fn record_usage_at(&self, record: TokenUsageRecord, now: DateTime<Utc>) {
        let cutoff = now
            .date_naive()
            .checked_sub_days(Days::new(RETENTION_DAYS - 1))
            .unwrap_or(NaiveDate::MIN);
        let day = record.timestamp.date_naive();

        let entry = self.ledgers.entry(record.provider.clone()).or_default();
        let mut ledger = entry.lock();

        if day >= cutoff {
            ledger.entry(day).or_default().add(&record);
        }

        let before = ledger.len();
        ledger.retain(|date, _| *date >= cutoff);
        if ledger.len() != before {
            debug!(
                provider = %record.provider,
                pruned = before - ledger.len(),
                "pruned expired usage buckets"
            );
        }
    }

    pub(crate) fn daily_usage(&self, provider: &str, day: NaiveDate) -> DailyUsage {
        self.ledgers
            .get(provider)
            .and_then(|ledger| ledger.lock().get(&day).copied())
            .unwrap_or_default()
    }

    pub(crate) fn usage_stats_on(&self, provider: &str, day: NaiveDate) -> UsageStats {
        let usage = self.daily_usage(provider, day);
        UsageStats {
            provider: provider.to_string(),
            date: day,
            daily_cost_cents: usage.cost_cents,
            daily_tokens: usage.tokens,
            remaining_daily_cents: self
                .budgets
                .get(provider)
                .map(|b| b.daily_limit_cents.saturating_sub(usage.cost_cents)),
            request_count: usage.request_count,
        }
    }
}
