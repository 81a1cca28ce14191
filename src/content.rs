//! 静态内容加载
//!
//! 导师概念列表与销售知识库都是只读 JSON 文件，在 Agent 构造时加载一次。
//! 文件缺失或格式错误时记录错误并回退为空内容，Agent 仍可启动（只是没有可讲的内容）。

use std::path::Path;

use serde::de::DeserializeOwned;

use crate::core::AgentError;

/// 读取并解析 JSON 内容文件
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, AgentError> {
    let data = std::fs::read_to_string(path).map_err(|e| AgentError::ContentLoad {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    serde_json::from_str(&data).map_err(|e| AgentError::ContentLoad {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

/// 读取 JSON 内容文件；任何失败都记录错误并返回 T::default()
pub fn load_json_or_default<T: DeserializeOwned + Default>(path: &Path) -> T {
    match load_json(path) {
        Ok(v) => v,
        Err(e) => {
            tracing::error!(error = %e, "Error loading content");
            T::default()
        }
    }
}
