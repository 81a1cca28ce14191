//! VoiceAgent：会话驱动看到的 Agent 形状
//!
//! 每个 Agent 只是「指令 + 工具」的配置对象。指令可能随工具调用而变化（导师切换模式），
//! 所以会话在每次调用模型前都重新读取。

use async_trait::async_trait;

use crate::tools::ToolRegistry;

#[async_trait]
pub trait VoiceAgent: Send + Sync {
    fn name(&self) -> &str;

    /// 当前生效的指令
    async fn instructions(&self) -> String;

    /// 暴露给模型的工具；与 Agent 共享状态
    fn tools(&self) -> ToolRegistry;
}
