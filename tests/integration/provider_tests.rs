//! Adapter integration tests
//!
//! Each adapter is driven against a mock server to check the request it sends and
//! how backend replies map onto responses and canonical errors.

#[cfg(test)]
mod tests {
    use crate::common::{anthropic_body, local_body, openai_body, settings};
    use crate::{assert_err, assert_ok};
    use llm_router::core::providers::{AnthropicAdapter, LocalAdapter, OpenAIAdapter};
    use llm_router::{
        ErrorKind, FinishReason, GenerationRequest, ProviderAdapter, RequestContext, Usage,
    };
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_openai_completion() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .and(body_partial_json(json!({
                "model": "gpt-4o-mini",
                "messages": [
                    {"role": "system", "content": "Be brief."},
                    {"role": "user", "content": "Hello"}
                ],
                "max_tokens": 50
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(openai_body("gpt-4o-mini", "Hi there")))
            .expect(1)
            .mount(&server)
            .await;

        let adapter = assert_ok!(OpenAIAdapter::new(settings("gpt", &server.uri(), "gpt-4o-mini")));
        let request = GenerationRequest::prompt("Hello")
            .with_system_prompt("Be brief.")
            .with_max_tokens(50);
        let ctx = RequestContext::new();

        let response = assert_ok!(adapter.generate_completion(&request, "gpt-4o-mini", &ctx).await);
        assert_eq!(response.content, "Hi there");
        assert_eq!(response.usage, Usage::new(12, 5));
        assert_eq!(response.provider, "gpt");
        assert_eq!(response.model, "gpt-4o-mini");
        assert_eq!(response.correlation_id, ctx.correlation_id);
        assert_eq!(response.finish_reason, FinishReason::Stop);
        assert_eq!(adapter.calculate_cost("gpt-4o-mini", 12, 5), 17);
    }

    #[tokio::test]
    async fn test_openai_rate_limit_is_retryable() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(429).set_body_json(json!({
                "error": {"message": "Rate limit reached", "type": "requests", "code": "rate_limit_exceeded"}
            })))
            .mount(&server)
            .await;

        let adapter = assert_ok!(OpenAIAdapter::new(settings("gpt", &server.uri(), "gpt-4o-mini")));
        let ctx = RequestContext::new();
        let err = assert_err!(
            adapter
                .generate_completion(&GenerationRequest::prompt("x"), "gpt-4o-mini", &ctx)
                .await
        );

        assert_eq!(err.kind, ErrorKind::RateLimited);
        assert!(err.retryable);
        assert_eq!(err.status, Some(429));
        assert_eq!(err.provider, "gpt");
        assert_eq!(err.model.as_deref(), Some("gpt-4o-mini"));
        assert_eq!(err.correlation_id, ctx.correlation_id);
        assert!(err.message.contains("Rate limit reached"));
    }

    #[tokio::test]
    async fn test_openai_unauthorized_is_not_retryable() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "error": {"message": "Incorrect API key provided", "type": "invalid_request_error", "code": "invalid_api_key"}
            })))
            .mount(&server)
            .await;

        let adapter = assert_ok!(OpenAIAdapter::new(settings("gpt", &server.uri(), "gpt-4o-mini")));
        let err = assert_err!(
            adapter
                .generate_completion(&GenerationRequest::prompt("x"), "gpt-4o-mini", &RequestContext::new())
                .await
        );
        assert_eq!(err.kind, ErrorKind::Unauthorized);
        assert!(!err.retryable);
    }

    #[tokio::test]
    async fn test_openai_empty_choices() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
            .mount(&server)
            .await;

        let adapter = assert_ok!(OpenAIAdapter::new(settings("gpt", &server.uri(), "gpt-4o-mini")));
        let err = assert_err!(
            adapter
                .generate_completion(&GenerationRequest::prompt("x"), "gpt-4o-mini", &RequestContext::new())
                .await
        );
        assert_eq!(err.kind, ErrorKind::Unknown);
        assert!(err.retryable);
    }

    #[tokio::test]
    async fn test_openai_malformed_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
            .mount(&server)
            .await;

        let adapter = assert_ok!(OpenAIAdapter::new(settings("gpt", &server.uri(), "gpt-4o-mini")));
        let err = assert_err!(
            adapter
                .generate_completion(&GenerationRequest::prompt("x"), "gpt-4o-mini", &RequestContext::new())
                .await
        );
        assert_eq!(err.kind, ErrorKind::Unknown);
    }

    #[tokio::test]
    async fn test_slow_backend_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(openai_body("gpt-4o-mini", "late"))
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let adapter = assert_ok!(OpenAIAdapter::new(
            settings("gpt", &server.uri(), "gpt-4o-mini").with_timeout(Duration::from_millis(100))
        ));
        let err = assert_err!(
            adapter
                .generate_completion(&GenerationRequest::prompt("x"), "gpt-4o-mini", &RequestContext::new())
                .await
        );
        assert_eq!(err.kind, ErrorKind::ServerError);
        assert!(err.retryable);
    }

    #[tokio::test]
    async fn test_connection_refused() {
        // Nothing listens on the discard port
        let adapter = assert_ok!(OpenAIAdapter::new(settings("gpt", "http://127.0.0.1:9", "gpt-4o-mini")));
        let err = assert_err!(
            adapter
                .generate_completion(&GenerationRequest::prompt("x"), "gpt-4o-mini", &RequestContext::new())
                .await
        );
        assert_eq!(err.kind, ErrorKind::ConnectionRefused);
        assert!(err.retryable);
    }

    #[tokio::test]
    async fn test_anthropic_completion() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .and(header("x-api-key", "sk-test"))
            .and(header("anthropic-version", "2023-06-01"))
            .and(body_partial_json(json!({
                "model": "claude-3-5-haiku-20241022",
                "system": "You are an appraiser.",
                "messages": [{"role": "user", "content": "Value this house"}]
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(anthropic_body("claude-3-5-haiku-20241022", "About 400k")),
            )
            .expect(1)
            .mount(&server)
            .await;

        let adapter = assert_ok!(AnthropicAdapter::new(settings(
            "claude",
            &server.uri(),
            "claude-3-5-haiku-20241022"
        )));
        let request =
            GenerationRequest::prompt("Value this house").with_system_prompt("You are an appraiser.");

        let response = assert_ok!(
            adapter
                .generate_completion(&request, "claude-3-5-haiku-20241022", &RequestContext::new())
                .await
        );
        assert_eq!(response.content, "About 400k");
        assert_eq!(response.usage, Usage::new(10, 4));
        assert_eq!(response.provider, "claude");
    }

    #[tokio::test]
    async fn test_anthropic_overloaded_is_retryable() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .respond_with(ResponseTemplate::new(529).set_body_json(json!({
                "type": "error",
                "error": {"type": "overloaded_error", "message": "Overloaded"}
            })))
            .mount(&server)
            .await;

        let adapter = assert_ok!(AnthropicAdapter::new(settings("claude", &server.uri(), "claude-3-5-haiku")));
        let err = assert_err!(
            adapter
                .generate_completion(&GenerationRequest::prompt("x"), "claude-3-5-haiku", &RequestContext::new())
                .await
        );
        assert_eq!(err.kind, ErrorKind::ServerError);
        assert!(err.retryable);
        assert_eq!(err.message, "Overloaded");
    }

    #[tokio::test]
    async fn test_anthropic_invalid_request_is_not_retryable() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "type": "error",
                "error": {"type": "invalid_request_error", "message": "max_tokens: too large"}
            })))
            .mount(&server)
            .await;

        let adapter = assert_ok!(AnthropicAdapter::new(settings("claude", &server.uri(), "claude-3-5-haiku")));
        let err = assert_err!(
            adapter
                .generate_completion(&GenerationRequest::prompt("x"), "claude-3-5-haiku", &RequestContext::new())
                .await
        );
        assert_eq!(err.kind, ErrorKind::BadRequest);
        assert!(!err.retryable);
    }

    #[tokio::test]
    async fn test_local_completion() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .and(body_partial_json(json!({"model": "llama3.1", "stream": false})))
            .respond_with(ResponseTemplate::new(200).set_body_json(local_body("llama3.1", "Paris")))
            .expect(1)
            .mount(&server)
            .await;

        let adapter = assert_ok!(LocalAdapter::new(settings("ollama", &server.uri(), "llama3.1")));
        let response = assert_ok!(
            adapter
                .generate_completion(
                    &GenerationRequest::prompt("Capital of France?"),
                    "llama3.1",
                    &RequestContext::new()
                )
                .await
        );
        assert_eq!(response.content, "Paris");
        assert_eq!(response.usage, Usage::new(8, 3));
        assert_eq!(response.provider, "ollama");
    }

    #[tokio::test]
    async fn test_health_probes() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/models"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/tags"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let openai = assert_ok!(OpenAIAdapter::new(settings("gpt", &server.uri(), "gpt-4o-mini")));
        let local = assert_ok!(LocalAdapter::new(settings("ollama", &server.uri(), "llama3.1")));
        assert!(openai.is_healthy().await);
        assert!(!local.is_healthy().await);
    }
}
