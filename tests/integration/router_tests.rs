//! End-to-end routing tests
//!
//! A router built from YAML configuration sends real HTTP to two mock backends: an
//! OpenAI-style `primary` and an Anthropic-style `backup`.

#[cfg(test)]
mod tests {
    use crate::common::{anthropic_body, openai_body};
    use crate::{assert_err, assert_ok};
    use llm_router::core::router::RouterBuilder;
    use llm_router::{
        AuditOutcome, CircuitState, Config, ErrorKind, GenerationRequest, MemoryAuditSink, Router,
        RouterError,
    };
    use serde_json::json;
    use std::sync::Arc;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const MODEL: &str = "test-model";

    fn config(primary: &MockServer, backup: &MockServer, extra: &str) -> Config {
        let yaml = format!(
            r#"
priority: [primary, backup]
providers:
  primary:
    kind: openai
    api_key: sk-primary
    base_url: {primary}
    models: [{MODEL}]
    default_max_tokens: 16
    pricing:
      {MODEL}: {{ input_cents_per_million: 1000000, output_cents_per_million: 1000000 }}
  backup:
    kind: anthropic
    api_key: sk-backup
    base_url: {backup}
    models: [{MODEL}]
    default_max_tokens: 16
    pricing:
      {MODEL}: {{ input_cents_per_million: 1000000, output_cents_per_million: 1000000 }}
{extra}
"#,
            primary = primary.uri(),
            backup = backup.uri(),
        );
        assert_ok!(Config::from_yaml_str(&yaml))
    }

    fn router_with_audit(config: &Config) -> (Router, Arc<MemoryAuditSink>) {
        let audit = Arc::new(MemoryAuditSink::new());
        let router = assert_ok!(
            assert_ok!(RouterBuilder::from_config(config))
                .audit_sink(audit.clone())
                .build()
        );
        (router, audit)
    }

    async fn primary_fails(server: &MockServer, status: u16) {
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(status).set_body_json(json!({
                "error": {"message": "backend unavailable", "type": "server_error"}
            })))
            .mount(server)
            .await;
    }

    async fn backup_replies(server: &MockServer, content: &str) {
        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .respond_with(ResponseTemplate::new(200).set_body_json(anthropic_body(MODEL, content)))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_primary_serves_when_healthy() {
        let primary = MockServer::start().await;
        let backup = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(openai_body(MODEL, "from primary")))
            .expect(1)
            .mount(&primary)
            .await;
        Mock::given(method("POST")).respond_with(ResponseTemplate::new(500)).expect(0).mount(&backup).await;

        let router = assert_ok!(Router::from_config(&config(&primary, &backup, "")));
        let response = assert_ok!(router.generate(GenerationRequest::prompt("Hello")).await);

        assert_eq!(response.content, "from primary");
        assert_eq!(response.provider, "primary");
        assert_eq!(response.cost_cents, 17);
        assert!(!response.correlation_id.is_empty());
    }

    #[tokio::test]
    async fn test_falls_back_on_server_error() {
        let primary = MockServer::start().await;
        let backup = MockServer::start().await;
        primary_fails(&primary, 503).await;
        backup_replies(&backup, "from backup").await;

        let (router, audit) = router_with_audit(&config(&primary, &backup, ""));
        let response = assert_ok!(router.generate(GenerationRequest::prompt("Hello")).await);

        assert_eq!(response.content, "from backup");
        assert_eq!(response.provider, "backup");
        assert_eq!(response.cost_cents, 14);

        let records = audit.records_for(&response.correlation_id);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].provider, "primary");
        assert_eq!(records[0].outcome, AuditOutcome::Failure);
        assert_eq!(records[0].error_kind, Some(ErrorKind::ServerError));
        assert_eq!(records[1].provider, "backup");
        assert_eq!(records[1].outcome, AuditOutcome::Success);
    }

    #[tokio::test]
    async fn test_unauthorized_stops_the_chain() {
        let primary = MockServer::start().await;
        let backup = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "error": {"message": "bad key", "code": "invalid_api_key"}
            })))
            .mount(&primary)
            .await;
        Mock::given(method("POST")).respond_with(ResponseTemplate::new(200)).expect(0).mount(&backup).await;

        let router = assert_ok!(Router::from_config(&config(&primary, &backup, "")));
        let err = assert_err!(router.generate(GenerationRequest::prompt("Hello")).await);

        assert_eq!(err.kind(), Some(ErrorKind::Unauthorized));
        assert!(!err.is_retryable());
        assert_eq!(err.provider_error().map(|e| e.provider.as_str()), Some("primary"));
    }

    #[tokio::test]
    async fn test_all_providers_failing_exhausts() {
        let primary = MockServer::start().await;
        let backup = MockServer::start().await;
        primary_fails(&primary, 500).await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_json(json!({
                "type": "error",
                "error": {"type": "rate_limit_error", "message": "slow down"}
            })))
            .mount(&backup)
            .await;

        let router = assert_ok!(Router::from_config(&config(&primary, &backup, "")));
        let err = assert_err!(router.generate(GenerationRequest::prompt("Hello")).await);

        match err {
            RouterError::ProvidersExhausted {
                attempted,
                skipped,
                last_error,
                ..
            } => {
                assert_eq!(attempted, vec!["primary", "backup"]);
                assert!(skipped.is_empty());
                assert_eq!(last_error.map(|e| e.kind), Some(ErrorKind::RateLimited));
            }
            other => panic!("expected exhaustion, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_open_circuit_skips_provider() {
        let primary = MockServer::start().await;
        let backup = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&primary)
            .await;
        backup_replies(&backup, "ok").await;

        let extra = "circuit_breaker:\n  failure_threshold: 1\n  reset_timeout_secs: 300\n";
        let (router, audit) = router_with_audit(&config(&primary, &backup, extra));

        let first = assert_ok!(router.generate(GenerationRequest::prompt("one")).await);
        assert_eq!(first.provider, "backup");
        assert_eq!(router.circuit_breaker().state("primary"), CircuitState::Open);

        let second = assert_ok!(router.generate(GenerationRequest::prompt("two")).await);
        assert_eq!(second.provider, "backup");

        let records = audit.records_for(&second.correlation_id);
        assert_eq!(records[0].outcome, AuditOutcome::SkippedCircuit);
        assert_eq!(records[0].provider, "primary");
    }

    #[tokio::test]
    async fn test_budget_skips_provider() {
        let primary = MockServer::start().await;
        let backup = MockServer::start().await;
        Mock::given(method("POST")).respond_with(ResponseTemplate::new(200)).expect(0).mount(&primary).await;
        backup_replies(&backup, "cheap answer").await;

        let extra = "budgets:\n  primary:\n    daily_limit_cents: 1000\n    per_request_limit_cents: 1\n";
        let router = assert_ok!(Router::from_config(&config(&primary, &backup, extra)));
        let response = assert_ok!(router.generate(GenerationRequest::prompt("Hello")).await);
        assert_eq!(response.provider, "backup");

        let stats = router.usage_stats();
        assert_eq!(stats[0].provider, "primary");
        assert_eq!(stats[0].request_count, 0);
        assert_eq!(stats[1].provider, "backup");
        assert_eq!(stats[1].daily_cost_cents, 14);
    }

    #[tokio::test]
    async fn test_daily_budget_is_enforced_across_requests() {
        let primary = MockServer::start().await;
        let backup = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(openai_body(MODEL, "paid")))
            .expect(1)
            .mount(&primary)
            .await;
        Mock::given(method("POST")).respond_with(ResponseTemplate::new(500)).mount(&backup).await;

        // Each estimate is 18 cents; after one 17 cent call the second does not fit
        let extra = "budgets:\n  primary:\n    daily_limit_cents: 30\n    per_request_limit_cents: 30\n";
        let router = assert_ok!(Router::from_config(&config(&primary, &backup, extra)));

        assert_ok!(router.generate(GenerationRequest::prompt("Hello")).await);
        assert_eq!(router.budget_tracker().get_daily_cost("primary"), 17);

        let err = assert_err!(router.generate(GenerationRequest::prompt("Hello")).await);
        match err {
            RouterError::ProvidersExhausted { attempted, skipped, .. } => {
                assert_eq!(attempted, vec!["backup"]);
                assert_eq!(skipped.len(), 1);
                assert!(skipped[0].starts_with("primary: "));
                assert!(skipped[0].contains("daily limit 30c"));
            }
            other => panic!("expected exhaustion, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_response_is_redacted() {
        let primary = MockServer::start().await;
        let backup = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(openai_body(
                MODEL,
                "Contact jane.doe@example.com or 555-867-5309.",
            )))
            .mount(&primary)
            .await;

        let (router, audit) = router_with_audit(&config(&primary, &backup, ""));
        let response = assert_ok!(router.generate(GenerationRequest::prompt("Who?")).await);

        assert!(response.redacted);
        assert!(response.content.contains("[REDACTED_EMAIL]"));
        assert!(response.content.contains("[REDACTED_PHONE]"));
        assert!(!response.content.contains("jane.doe"));

        let records = audit.records_for(&response.correlation_id);
        let excerpt = records[0].excerpt.as_deref().unwrap_or_default();
        assert!(!excerpt.contains("jane.doe"));
    }

    #[tokio::test]
    async fn test_schema_validation_on_fenced_json() {
        let primary = MockServer::start().await;
        let backup = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(openai_body(
                MODEL,
                "```json\n{\"estimate\": 410000, \"currency\": \"USD\"}\n```",
            )))
            .mount(&primary)
            .await;

        let router = assert_ok!(Router::from_config(&config(&primary, &backup, "")));
        let schema = json!({
            "type": "object",
            "required": ["estimate", "currency"],
            "properties": {
                "estimate": {"type": "number"},
                "currency": {"type": "string"}
            }
        });
        let response = assert_ok!(
            router
                .generate(GenerationRequest::prompt("Appraise").with_schema(schema))
                .await
        );

        assert!(response.schema_validated);
        assert!(response.schema_valid);
        assert!(response.validation_errors.is_empty());
    }

    #[tokio::test]
    async fn test_health_check_reports_each_provider() {
        let primary = MockServer::start().await;
        let backup = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/models"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&primary)
            .await;
        Mock::given(method("GET"))
            .and(path("/v1/models"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&backup)
            .await;

        let router = assert_ok!(Router::from_config(&config(&primary, &backup, "")));
        let health = router.health_check().await;

        assert_eq!(health.len(), 2);
        assert_eq!(health[0].provider, "primary");
        assert!(health[0].healthy);
        assert_eq!(health[1].provider, "backup");
        assert!(!health[1].healthy);
        assert_eq!(health[1].circuit_state, CircuitState::Closed);
    }
}
