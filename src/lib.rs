//! Voice Agents - 语音导师 / 销售 SDR 两个 Agent 的核心逻辑
//!
//! 模块划分：
//! - **config**: 应用配置加载（TOML + 环境变量）
//! - **content**: 静态内容文件（JSON）加载，失败时回退为空内容
//! - **core**: 错误与恢复、VoiceAgent 抽象、工具调用会话驱动（AgentSession）
//! - **llm**: LLM 客户端抽象与实现（OpenAI 兼容 / Mock / Scripted）
//! - **memory**: 对话历史（短期记忆）
//! - **observability**: tracing 订阅器初始化（由宿主进程调用）
//! - **sales**: 销售 SDR：公司知识库、线索落盘、save_lead 工具
//! - **tools**: 工具 trait、注册表与带超时的执行器
//! - **tutor**: Active Recall 导师：模式/概念状态机、指令渲染、switch_mode 等工具
//! - **voice**: 语音合成音色切换能力（由会话注入）
//! - **console**: 文本模式的交互循环（两个二进制共用）

pub mod config;
pub mod console;
pub mod content;
pub mod core;
pub mod llm;
pub mod memory;
pub mod observability;
pub mod sales;
pub mod tools;
pub mod tutor;
pub mod voice;

pub use crate::core::{AgentError, AgentSession, VoiceAgent};
pub use sales::SalesAgent;
pub use tutor::TutorAgent;
