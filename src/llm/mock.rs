//! 测试与离线用的 LLM 客户端
//!
//! - MockLlmClient：没有 API Key 时的兜底，回显用户最后一句话，不调用工具
//! - ScriptedLlmClient：按顺序返回预设输出，并记录每次收到的 system 指令，供测试断言

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::llm::LlmClient;
use crate::memory::{Message, Role};

#[derive(Debug, Default)]
pub struct MockLlmClient;

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn complete(&self, messages: &[Message]) -> Result<String, String> {
        let last_user = messages
            .iter()
            .rev()
            .find(|m| m.role == Role::User)
            .map(|m| m.content.as_str());
        Ok(match last_user {
            Some(text) => format!("(mock) You said: {text}"),
            None => "(mock) Hello! No language model is configured, so I can only echo you.".to_string(),
        })
    }
}

#[derive(Debug, Default)]
pub struct ScriptedLlmClient {
    replies: Mutex<VecDeque<String>>,
    systems: Mutex<Vec<String>>,
}

impl ScriptedLlmClient {
    pub fn new<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replies: Mutex::new(replies.into_iter().map(Into::into).collect()),
            systems: Mutex::new(Vec::new()),
        }
    }

    /// 每次 complete 收到的 system 消息内容（按调用顺序）
    pub fn system_prompts(&self) -> Vec<String> {
        self.systems.lock().map(|s| s.clone()).unwrap_or_default()
    }

    pub fn remaining(&self) -> usize {
        self.replies.lock().map(|r| r.len()).unwrap_or(0)
    }
}

#[async_trait]
impl LlmClient for ScriptedLlmClient {
    async fn complete(&self, messages: &[Message]) -> Result<String, String> {
        if let Some(system) = messages.iter().find(|m| m.role == Role::System) {
            self.systems
                .lock()
                .map_err(|e| e.to_string())?
                .push(system.content.clone());
        }
        self.replies
            .lock()
            .map_err(|e| e.to_string())?
            .pop_front()
            .ok_or_else(|| "script exhausted".to_string())
    }
}
