//! Pre-flight token estimation

/// Characters per token for OpenAI-style tokenizers
pub const OPENAI_CHARS_PER_TOKEN: f64 = 4.0;
/// Characters per token for Anthropic tokenizers
pub const ANTHROPIC_CHARS_PER_TOKEN: f64 = 3.5;
/// Characters per token for local models
pub const LOCAL_CHARS_PER_TOKEN: f64 = 4.0;

/// Estimates token counts before a call is made
pub trait TokenEstimator: Send + Sync + std::fmt::Debug {
    fn estimate(&self, text: &str) -> u32;
}

/// Fixed characters-per-token heuristic, rounded up
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharRatioEstimator {
    chars_per_token: f64,
}

impl CharRatioEstimator {
    pub fn new(chars_per_token: f64) -> Self {
        let chars_per_token = if chars_per_token.is_finite() && chars_per_token > 0.0 {
            chars_per_token
        } else {
            OPENAI_CHARS_PER_TOKEN
        };
        Self { chars_per_token }
    }

    pub fn openai() -> Self {
        Self::new(OPENAI_CHARS_PER_TOKEN)
    }

    pub fn anthropic() -> Self {
        Self::new(ANTHROPIC_CHARS_PER_TOKEN)
    }

    pub fn local() -> Self {
        Self::new(LOCAL_CHARS_PER_TOKEN)
    }
}

impl TokenEstimator for CharRatioEstimator {
    fn estimate(&self, text: &str) -> u32 {
        let chars = text.chars().count();
        if chars == 0 {
            return 0;
        }
        let tokens = (chars as f64 / self.chars_per_token).ceil();
        if tokens >= u32::MAX as f64 {
            u32::MAX
        } else {
            tokens as u32
        }
    }
}
