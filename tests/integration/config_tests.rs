//! Configuration loading tests

#[cfg(test)]
mod tests {
    use crate::{assert_err, assert_ok};
    use llm_router::{Config, ProviderKind, Router};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_example_config_loads() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config/router.yaml.example");
        let config = assert_ok!(Config::from_file(path).await);

        assert_eq!(config.effective_priority(), vec!["openai", "anthropic", "ollama"]);
        assert_eq!(config.providers["ollama"].kind, ProviderKind::Local);
        assert_eq!(config.budgets["openai"].per_request_limit_cents, 50);
        assert_eq!(config.redaction.custom_rules[0].name, "mls_number");

        let router = assert_ok!(Router::from_config(&config));
        assert_eq!(router.registry().ids(), &["openai", "anthropic", "ollama"]);
        assert!(router.redactor().redact("See MLS# 1234567").contains("[REDACTED_MLS]"));
    }

    #[tokio::test]
    async fn test_missing_file_is_a_config_error() {
        let err = assert_err!(Config::from_file("/nonexistent/router.yaml").await);
        assert!(err.to_string().contains("failed to read config file"));
    }

    #[tokio::test]
    async fn test_invalid_priority_rejected_on_load() {
        let file = write_config(
            r#"
priority: [mistral]
providers:
  ollama:
    kind: local
    models: [llama3.1]
"#,
        );
        let err = assert_err!(Config::from_file(file.path()).await);
        assert!(err.to_string().contains("unknown provider 'mistral'"));
    }

    #[tokio::test]
    async fn test_bad_redaction_pattern_rejected_on_load() {
        let file = write_config(
            r#"
providers:
  ollama:
    kind: local
    models: [llama3.1]
redaction:
  custom_rules:
    - name: broken
      pattern: '(unclosed'
      replacement: '[X]'
"#,
        );
        let err = assert_err!(Config::from_file(file.path()).await);
        assert!(err.to_string().contains("invalid configuration"));
    }

    #[tokio::test]
    async fn test_saved_config_round_trips() {
        let original = r#"
priority: [ollama]
providers:
  ollama:
    kind: local
    timeout_secs: 90
    models: [llama3.1, mistral]
circuit_breaker:
  failure_threshold: 2
  reset_timeout_secs: 10
"#;
        let config = assert_ok!(Config::from_yaml_str(original));
        let file = write_config(&assert_ok!(config.to_yaml()));

        let reloaded = assert_ok!(Config::from_file(file.path()).await);
        assert_eq!(reloaded.providers["ollama"].timeout_secs, 90);
        assert_eq!(reloaded.providers["ollama"].models, vec!["llama3.1", "mistral"]);
        assert_eq!(reloaded.circuit_breaker.failure_threshold, 2);
    }
}
