//! Integer pricing tables
//!
//! Prices are whole cents per million tokens, so every cost stays an exact integer.
//! Lookups try the exact model name first, then the longest configured prefix,
//! which lets dated snapshots such as `gpt-4o-mini-2024-07-18` share a base entry.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

const TOKENS_PER_UNIT: u128 = 1_000_000;

/// Price of one model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelPrice {
    pub input_cents_per_million: u64,
    pub output_cents_per_million: u64,
}

impl ModelPrice {
    pub const fn new(input_cents_per_million: u64, output_cents_per_million: u64) -> Self {
        Self {
            input_cents_per_million,
            output_cents_per_million,
        }
    }

    /// Cost in cents, rounded up so a non-free call never reports zero
    pub fn cost_cents(&self, prompt_tokens: u32, completion_tokens: u32) -> u64 {
        let numerator = self.input_cents_per_million as u128 * prompt_tokens as u128
            + self.output_cents_per_million as u128 * completion_tokens as u128;
        let cents = numerator.div_ceil(TOKENS_PER_UNIT);
        u64::try_from(cents).unwrap_or(u64::MAX)
    }
}

static OPENAI_PRICES: Lazy<HashMap<String, ModelPrice>> = Lazy::new(|| {
    [
        ("gpt-4o", ModelPrice::new(250, 1_000)),
        ("gpt-4o-mini", ModelPrice::new(15, 60)),
        ("gpt-4-turbo", ModelPrice::new(1_000, 3_000)),
        ("gpt-4", ModelPrice::new(3_000, 6_000)),
        ("gpt-3.5-turbo", ModelPrice::new(50, 150)),
        ("o1", ModelPrice::new(1_500, 6_000)),
        ("o1-mini", ModelPrice::new(300, 1_200)),
    ]
    .into_iter()
    .map(|(model, price)| (model.to_string(), price))
    .collect()
});

static ANTHROPIC_PRICES: Lazy<HashMap<String, ModelPrice>> = Lazy::new(|| {
    [
        ("claude-3-5-sonnet", ModelPrice::new(300, 1_500)),
        ("claude-3-5-haiku", ModelPrice::new(80, 400)),
        ("claude-3-opus", ModelPrice::new(1_500, 7_500)),
        ("claude-3-sonnet", ModelPrice::new(300, 1_500)),
        ("claude-3-haiku", ModelPrice::new(25, 125)),
        ("claude-sonnet-4", ModelPrice::new(300, 1_500)),
        ("claude-opus-4", ModelPrice::new(1_500, 7_500)),
    ]
    .into_iter()
    .map(|(model, price)| (model.to_string(), price))
    .collect()
});

/// Per-adapter pricing table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PricingTable {
    prices: HashMap<String, ModelPrice>,
}

impl PricingTable {
    /// A table with no entries; every model costs 0
    pub fn empty() -> Self {
        Self::default()
    }

    /// Built-in OpenAI list prices
    pub fn openai() -> Self {
        Self {
            prices: OPENAI_PRICES.clone(),
        }
    }

    /// Built-in Anthropic list prices
    pub fn anthropic() -> Self {
        Self {
            prices: ANTHROPIC_PRICES.clone(),
        }
    }

    /// Configured entries replace built-ins of the same name
    pub fn with_overrides(mut self, overrides: &HashMap<String, ModelPrice>) -> Self {
        self.prices
            .extend(overrides.iter().map(|(model, price)| (model.clone(), *price)));
        self
    }

    pub fn insert(&mut self, model: impl Into<String>, price: ModelPrice) {
        self.prices.insert(model.into(), price);
    }

    /// Exact match, then the longest prefix of `model`
    pub fn lookup(&self, model: &str) -> Option<ModelPrice> {
        if let Some(price) = self.prices.get(model) {
            return Some(*price);
        }

        self.prices
            .iter()
            .filter(|(key, _)| model.starts_with(key.as_str()))
            .max_by_key(|(key, _)| key.len())
            .map(|(_, price)| *price)
    }

    /// Cost in cents; unmapped models cost 0
    pub fn cost_cents(&self, model: &str, prompt_tokens: u32, completion_tokens: u32) -> u64 {
        self.lookup(model)
            .map(|price| price.cost_cents(prompt_tokens, completion_tokens))
            .unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cost_rounds_up() {
        let price = ModelPrice::new(15, 60);
        // 1000 * 15 + 500 * 60 = 45_000 -> 0.045 cents -> 1
        assert_eq!(price.cost_cents(1_000, 500), 1);
        assert_eq!(price.cost_cents(0, 0), 0);

        let price = ModelPrice::new(250, 1_000);
        // 1_000_000 * 250 + 1_000_000 * 1000 = 1250 cents exactly
        assert_eq!(price.cost_cents(1_000_000, 1_000_000), 1_250);
    }

    #[test]
    fn test_cost_does_not_overflow() {
        let price = ModelPrice::new(u64::MAX, u64::MAX);
        assert_eq!(price.cost_cents(u32::MAX, u32::MAX), u64::MAX);
    }

    #[test]
    fn test_exact_then_longest_prefix() {
        let table = PricingTable::openai();
        assert_eq!(table.lookup("gpt-4o"), Some(ModelPrice::new(250, 1_000)));
        assert_eq!(
            table.lookup("gpt-4o-mini-2024-07-18"),
            Some(ModelPrice::new(15, 60))
        );
        assert_eq!(
            table.lookup("gpt-4-0613"),
            Some(ModelPrice::new(3_000, 6_000))
        );
        assert_eq!(table.lookup("text-davinci-003"), None);
    }

    #[test]
    fn test_unmapped_model_costs_zero() {
        let table = PricingTable::anthropic();
        assert_eq!(table.cost_cents("mystery-model", 10_000, 10_000), 0);
        assert_eq!(PricingTable::empty().cost_cents("llama3", 10_000, 10_000), 0);
    }

    #[test]
    fn test_overrides_win() {
        let mut overrides = HashMap::new();
        overrides.insert("gpt-4o".to_string(), ModelPrice::new(1, 1));
        overrides.insert("custom".to_string(), ModelPrice::new(100, 100));

        let table = PricingTable::openai().with_overrides(&overrides);
        assert_eq!(table.lookup("gpt-4o"), Some(ModelPrice::new(1, 1)));
        assert_eq!(table.cost_cents("custom", 1_000_000, 0), 100);
    }

    #[test]
    fn test_anthropic_snapshot_names() {
        let table = PricingTable::anthropic();
        assert_eq!(
            table.lookup("claude-3-5-sonnet-20241022"),
            Some(ModelPrice::new(300, 1_500))
        );
        assert_eq!(
            table.lookup("claude-3-haiku-20240307"),
            Some(ModelPrice::new(25, 125))
        );
    }
}
