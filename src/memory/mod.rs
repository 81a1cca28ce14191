//! 记忆层：单个会话内的对话历史（会话结束即丢弃）

pub mod conversation;

pub use conversation::{ConversationMemory, Message, Role};
