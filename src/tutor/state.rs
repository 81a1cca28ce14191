//! 导师会话状态：当前模式 + 当前概念

use crate::tutor::Mode;

/// 会话内可变状态；初始为 learn 且未选概念（对应开场问候）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TutorState {
    pub mode: Mode,
    pub concept_id: Option<String>,
}

impl Default for TutorState {
    fn default() -> Self {
        Self {
            mode: Mode::Learn,
            concept_id: None,
        }
    }
}

impl TutorState {
    /// learn 模式且尚未选择概念时，Agent 处于开场问候阶段
    pub fn is_greeting(&self) -> bool {
        self.mode == Mode::Learn && self.concept_id.is_none()
    }
}
