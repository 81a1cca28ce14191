//! 核心层：错误与恢复、Agent 抽象、模型输出解析、会话驱动

pub mod agent;
pub mod error;
pub mod planner;
pub mod recovery;
pub mod session;

pub use agent::VoiceAgent;
pub use error::{AgentError, RecoveryAction};
pub use planner::{parse_llm_output, PlannerOutput, ToolCall};
pub use recovery::RecoveryEngine;
pub use session::{AgentSession, MAX_TOOL_STEPS, STEP_LIMIT_REPLY};
