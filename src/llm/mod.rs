//! LLM 层：客户端抽象与实现（OpenAI 兼容 / Mock / Scripted）

pub mod mock;
pub mod openai;
pub mod traits;

use std::sync::Arc;

pub use mock::{MockLlmClient, ScriptedLlmClient};
pub use openai::{OpenAiClient, TokenUsage};
pub use traits::LlmClient;

use crate::config::AppConfig;

/// 根据配置与环境变量选择 LLM 后端：provider=openai 且有 OPENAI_API_KEY 时用 OpenAI 兼容端点，否则 Mock
pub fn create_llm_from_config(cfg: &AppConfig) -> Arc<dyn LlmClient> {
    let provider = cfg.llm.provider.to_lowercase();
    match std::env::var("OPENAI_API_KEY") {
        Ok(key) if provider == "openai" && !key.is_empty() => {
            tracing::info!(model = %cfg.llm.model, base_url = ?cfg.llm.base_url, "Using OpenAI-compatible LLM");
            Arc::new(OpenAiClient::new(
                cfg.llm.base_url.as_deref(),
                &cfg.llm.model,
                &key,
            ))
        }
        _ => {
            tracing::warn!(provider = %provider, "No API key set or provider is mock, using Mock LLM");
            Arc::new(MockLlmClient)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::Message;

    #[tokio::test]
    async fn test_mock_echoes_last_user_message() {
        let reply = MockLlmClient
            .complete(&[Message::system("sys"), Message::user("hello")])
            .await
            .unwrap();
        assert_eq!(reply, "(mock) You said: hello");
    }

    #[tokio::test]
    async fn test_scripted_records_system_prompts() {
        let llm = ScriptedLlmClient::new(["one"]);
        assert_eq!(llm.complete(&[Message::system("A")]).await.unwrap(), "one");
        assert!(llm.complete(&[Message::system("B")]).await.is_err());
        assert_eq!(llm.system_prompts(), vec!["A", "B"]);
        assert_eq!(llm.remaining(), 0);
    }
}
