//! 错误恢复引擎
//!
//! 根据 AgentError 类型返回 RecoveryAction，供会话驱动决定是重试还是终止本轮。

use crate::core::{AgentError, RecoveryAction};

/// 语义化错误恢复：将错误映射为可执行动作（重试提示 / 终止）
#[derive(Debug, Default)]
pub struct RecoveryEngine;

impl RecoveryEngine {
    pub fn new() -> Self {
        Self
    }

    /// 根据错误类型返回建议的恢复动作；valid_tools 用于提示模型可用的工具名
    pub fn handle(&self, err: &AgentError, valid_tools: &[String]) -> RecoveryAction {
        match err {
            AgentError::JsonParseError(raw) => RecoveryAction::RetryWithPrompt(format!(
                "Your previous tool call was not valid JSON: {raw}. \
                When calling a tool, output exactly one JSON object and nothing else, \
                in the form {{\"tool\": \"<name>\", \"args\": {{...}}}}."
            )),
            AgentError::HallucinatedTool(name) => {
                let mut names = valid_tools.to_vec();
                names.sort();
                RecoveryAction::RetryWithPrompt(format!(
                    "There is no tool named '{name}'. Available tools: {}. \
                    Either call one of them or answer the user directly.",
                    names.join(", ")
                ))
            }
            AgentError::NetworkTimeout => {
                RecoveryAction::RetryWithPrompt("The previous request timed out, please try again.".to_string())
            }
            _ => RecoveryAction::Abort,
        }
    }
}
