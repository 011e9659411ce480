//! PII redactor

use super::types::{PiiConfig, RedactionError};
use regex::{NoExpand, Regex};
use std::borrow::Cow;

#[derive(Debug, Clone)]
struct CompiledRule {
    name: String,
    regex: Regex,
    replacement: String,
}

/// Stateless rule engine replacing PII matches with fixed tokens
///
/// Rules run in category-list order followed by custom rules. Construction rejects
/// any configuration in which a rule would match another rule's replacement token,
/// which keeps `redact(redact(x)) == redact(x)`.
#[derive(Debug, Clone)]
pub struct PiiRedactor {
    enabled: bool,
    rules: Vec<CompiledRule>,
}

impl Default for PiiRedactor {
    fn default() -> Self {
        Self::from_categories(&PiiConfig::default())
    }
}

impl PiiRedactor {
    /// Compile a redactor from configuration
    pub fn new(config: &PiiConfig) -> Result<Self, RedactionError> {
        let mut redactor = Self::from_categories(config);

        for rule in &config.custom_rules {
            if rule.pattern.is_empty() {
                return Err(RedactionError::EmptyPattern {
                    name: rule.name.clone(),
                });
            }
            let regex =
                Regex::new(&rule.pattern).map_err(|source| RedactionError::InvalidPattern {
                    name: rule.name.clone(),
                    source,
                })?;
            redactor.rules.push(CompiledRule {
                name: rule.name.clone(),
                regex,
                replacement: rule.replacement.clone(),
            });
        }

        redactor.check_stable()?;
        Ok(redactor)
    }

    /// Redactor that returns text unchanged
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            rules: Vec::new(),
        }
    }

    fn from_categories(config: &PiiConfig) -> Self {
        let rules = config
            .categories
            .iter()
            .map(|category| CompiledRule {
                name: category.name().to_string(),
                regex: category.pattern().clone(),
                replacement: category.token().to_string(),
            })
            .collect();

        Self {
            enabled: config.enabled,
            rules,
        }
    }

    fn check_stable(&self) -> Result<(), RedactionError> {
        for rule in &self.rules {
            for other in &self.rules {
                if rule.regex.is_match(&other.replacement) {
                    return Err(RedactionError::UnstableReplacement {
                        rule: rule.name.clone(),
                        replaced_by: other.name.clone(),
                        replacement: other.replacement.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Replace every match of every active rule
    pub fn redact(&self, text: &str) -> String {
        if !self.enabled {
            return text.to_string();
        }

        let mut current: Cow<'_, str> = Cow::Borrowed(text);
        for rule in &self.rules {
            if let Cow::Owned(replaced) =
                rule.regex.replace_all(&current, NoExpand(&rule.replacement))
            {
                current = Cow::Owned(replaced);
            }
        }
        current.into_owned()
    }

    /// Redacted text cut to at most `max_chars` characters
    ///
    /// Redaction runs on the full text first so a value split by the cut is still
    /// caught.
    pub fn redact_excerpt(&self, text: &str, max_chars: usize) -> String {
        let redacted = self.redact(text);
        if redacted.chars().count() <= max_chars {
            return redacted;
        }
        let mut excerpt: String = redacted.chars().take(max_chars).collect();
        excerpt.push_str("...");
        excerpt
    }

    /// Whether any active rule matches `text`
    pub fn contains_pii(&self, text: &str) -> bool {
        self.enabled && self.rules.iter().any(|rule| rule.regex.is_match(text))
    }

    /// Names of the active rules, in application order
    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|rule| rule.name.as_str()).collect()
    }
}
