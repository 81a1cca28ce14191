//! Agent 错误类型与恢复动作
//!
//! 工具回调内部的错误一律转成文本返回给模型；这里的 AgentError 只在会话驱动、
//! 内容加载、线索存储等内部边界上传播，由 RecoveryEngine 决定重试还是终止本轮。

use thiserror::Error;

/// Agent 运行过程中可能出现的错误
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("Network timeout")]
    NetworkTimeout,

    #[error("JSON parse error: {0}")]
    JsonParseError(String),

    #[error("Tool execution failed: {0}")]
    ToolExecutionFailed(String),

    #[error("Tool timeout: {0}")]
    ToolTimeout(String),

    #[error("Hallucinated tool: {0}")]
    HallucinatedTool(String),

    #[error("LLM error: {0}")]
    LlmError(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Content load failed ({path}): {reason}")]
    ContentLoad { path: String, reason: String },

    #[error("Lead store error: {0}")]
    LeadStore(String),

    #[error("Voice update failed: {0}")]
    VoiceUpdate(String),
}

impl From<config::ConfigError> for AgentError {
    fn from(e: config::ConfigError) -> Self {
        AgentError::ConfigError(e.to_string())
    }
}

/// 恢复引擎根据错误类型给出的建议动作
#[derive(Debug, Clone)]
pub enum RecoveryAction {
    /// 将提示注入下一轮，让 LLM 重试（如 JSON 格式错误、调用了不存在的工具）
    RetryWithPrompt(String),
    /// 终止当前轮次
    Abort,
}
