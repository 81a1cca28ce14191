//! 线索持久化
//!
//! 线索文件是一个 JSON 数组；每次保存都「读取全部 -> 追加一条 -> 整体重写」。
//! 文件不存在或内容不是 JSON 数组时按空序列处理；已有记录按原始 JSON 值保留，不做字段校验。
//! 没有任何并发控制：两个会话同时保存可能丢失其中一条。

use std::path::{Path, PathBuf};

use chrono::Local;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::AgentError;

/// role / timeline 未提供时的占位值
pub const NOT_SPECIFIED: &str = "Not specified";

/// 一条销售线索；创建后不再修改
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lead {
    pub timestamp: String,
    pub name: String,
    pub company: String,
    pub email: String,
    pub role: String,
    pub interest: String,
    pub timeline: String,
}

impl Lead {
    /// 以当前本地时间创建线索；空的 role / timeline 记为 "Not specified"
    pub fn new(
        name: &str,
        company: &str,
        email: &str,
        interest: &str,
        role: Option<&str>,
        timeline: Option<&str>,
    ) -> Self {
        Self {
            timestamp: Local::now()
                .naive_local()
                .format("%Y-%m-%dT%H:%M:%S%.6f")
                .to_string(),
            name: name.to_string(),
            company: company.to_string(),
            email: email.to_string(),
            role: or_not_specified(role),
            interest: interest.to_string(),
            timeline: or_not_specified(timeline),
        }
    }
}

fn or_not_specified(value: Option<&str>) -> String {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(NOT_SPECIFIED)
        .to_string()
}

/// 基于单个 JSON 文件的线索存储
#[derive(Debug, Clone)]
pub struct LeadStore {
    path: PathBuf,
}

impl LeadStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 读取已有记录（原始 JSON 值）；文件不存在或格式错误返回空 Vec，其它读取错误向上传播
    pub fn load_raw(&self) -> Result<Vec<Value>, AgentError> {
        let data = match std::fs::read_to_string(&self.path) {
            Ok(d) => d,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(AgentError::LeadStore(format!(
                    "read {}: {}",
                    self.path.display(),
                    e
                )))
            }
        };
        match serde_json::from_str::<Vec<Value>>(&data) {
            Ok(leads) => Ok(leads),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "lead file is not a JSON array, starting fresh");
                Ok(Vec::new())
            }
        }
    }

    /// 读取能解析为 Lead 的记录（跳过形状不符的条目）
    pub fn load(&self) -> Result<Vec<Lead>, AgentError> {
        Ok(self
            .load_raw()?
            .into_iter()
            .filter_map(|v| serde_json::from_value(v).ok())
            .collect())
    }

    /// 追加一条线索并整体重写文件；返回写入后的记录总数
    pub fn append(&self, lead: &Lead) -> Result<usize, AgentError> {
        let mut leads = self.load_raw()?;
        let value = serde_json::to_value(lead).map_err(|e| AgentError::LeadStore(e.to_string()))?;
        leads.push(value);

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                AgentError::LeadStore(format!("create {}: {}", parent.display(), e))
            })?;
        }
        let body =
            serde_json::to_string_pretty(&leads).map_err(|e| AgentError::LeadStore(e.to_string()))?;
        std::fs::write(&self.path, body)
            .map_err(|e| AgentError::LeadStore(format!("write {}: {}", self.path.display(), e)))?;
        Ok(leads.len())
    }
}
