//! 模型输出解析
//!
//! 模型要调用工具时输出 `{"tool": "switch_mode", "args": {...}}`（可包在 ```json 代码块里），
//! 否则输出即为对用户的回复。

use serde::{Deserialize, Serialize};

use crate::core::AgentError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    pub tool: String,
    #[serde(default)]
    pub args: serde_json::Value,
}

#[derive(Debug, Clone)]
pub enum PlannerOutput {
    /// 直接回复用户
    Response(String),
    /// 需要执行工具
    ToolCall(ToolCall),
}

/// 解析模型输出：含 ```json 块或以 `{` 开头的 JSON 视为工具调用，其余为回复
pub fn parse_llm_output(output: &str) -> Result<PlannerOutput, AgentError> {
    let trimmed = output.trim();

    let json_str = if let Some(start) = trimmed.find("```json") {
        let rest = &trimmed[start + 7..];
        rest.find("```").map(|end| rest[..end].trim()).unwrap_or(rest.trim())
    } else if trimmed.starts_with('{') {
        match trimmed.rfind('}') {
            Some(end) => &trimmed[..=end],
            None => trimmed,
        }
    } else {
        return Ok(PlannerOutput::Response(trimmed.to_string()));
    };

    let parsed: ToolCall = serde_json::from_str(json_str)
        .map_err(|e| AgentError::JsonParseError(format!("{}: {}", e, json_str)))?;

    if parsed.tool.trim().is_empty() {
        Ok(PlannerOutput::Response(trimmed.to_string()))
    } else {
        Ok(PlannerOutput::ToolCall(parsed))
    }
}
