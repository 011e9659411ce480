//! Backend wire fixtures

use llm_router::core::providers::base::{ModelPrice, ProviderSettings};
use serde_json::{Value, json};
use std::time::Duration;

/// Price that makes every token cost exactly one cent
pub const CENT_PER_TOKEN: ModelPrice = ModelPrice::new(1_000_000, 1_000_000);

/// Settings for an adapter talking to `base_url`
pub fn settings(id: &str, base_url: &str, model: &str) -> ProviderSettings {
    ProviderSettings::new(id, base_url)
        .with_api_key("sk-test")
        .with_models([model])
        .with_timeout(Duration::from_secs(2))
        .with_price(model, CENT_PER_TOKEN)
}

/// OpenAI `/chat/completions` success body
pub fn openai_body(model: &str, content: &str) -> Value {
    json!({
        "id": "chatcmpl-123",
        "object": "chat.completion",
        "model": model,
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 12, "completion_tokens": 5, "total_tokens": 17}
    })
}

/// Anthropic `/v1/messages` success body
pub fn anthropic_body(model: &str, content: &str) -> Value {
    json!({
        "id": "msg_01",
        "type": "message",
        "role": "assistant",
        "model": model,
        "content": [{"type": "text", "text": content}],
        "stop_reason": "end_turn",
        "usage": {"input_tokens": 10, "output_tokens": 4}
    })
}

/// Ollama-style `/api/chat` success body
pub fn local_body(model: &str, content: &str) -> Value {
    json!({
        "model": model,
        "message": {"role": "assistant", "content": content},
        "done": true,
        "done_reason": "stop",
        "prompt_eval_count": 8,
        "eval_count": 3
    })
}
