//! 短期记忆：对话历史
//!
//! 保存用户发言、Agent 回复以及工具调用的观察结果；超出上限时从最旧处剪枝。
//! system 指令不进入历史，每次调用模型前由会话根据 Agent 当前状态重新生成。

use serde::{Deserialize, Serialize};

/// 消息角色（与 LLM API 一致）
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

/// 单条消息
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }
}

/// 对话历史：最多保留 max_turns*2 条消息
#[derive(Clone, Debug)]
pub struct ConversationMemory {
    messages: Vec<Message>,
    max_turns: usize,
}

impl ConversationMemory {
    pub fn new(max_turns: usize) -> Self {
        Self {
            messages: Vec::new(),
            max_turns: max_turns.max(1),
        }
    }

    pub fn push(&mut self, msg: Message) {
        self.messages.push(msg);
        self.prune();
    }

    /// 记录一次工具调用：assistant 侧写调用本身，user 侧写观察结果，供下一次规划使用
    pub fn push_tool_exchange(&mut self, raw_call: &str, tool: &str, observation: &str) {
        self.push(Message::assistant(raw_call.to_string()));
        self.push(Message::user(format!("Observation from {tool}: {observation}")));
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    fn prune(&mut self) {
        let keep = self.max_turns * 2;
        if self.messages.len() > keep {
            self.messages.drain(..self.messages.len() - keep);
        }
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prune_keeps_most_recent() {
        let mut mem = ConversationMemory::new(1);
        mem.push(Message::user("a"));
        mem.push(Message::assistant("b"));
        mem.push(Message::user("c"));
        assert_eq!(mem.len(), 2);
        assert_eq!(mem.messages()[0].content, "b");
        assert_eq!(mem.messages()[1].content, "c");
    }

    #[test]
    fn test_tool_exchange_adds_observation() {
        let mut mem = ConversationMemory::new(10);
        mem.push_tool_exchange(r#"{"tool":"save_lead"}"#, "save_lead", "Lead saved");
        assert_eq!(mem.len(), 2);
        assert_eq!(mem.messages()[0].role, Role::Assistant);
        assert_eq!(mem.messages()[1].content, "Observation from save_lead: Lead saved");
    }
}
