//! 语音合成音色切换能力
//!
//! 导师在切换模式时需要更换 TTS 音色。状态机不持有会话引用，而是由会话驱动把
//! 一个窄接口 `VoiceControl` 注入进来；真实 TTS 插件、控制台演示和测试各自实现它。

use std::sync::Mutex;

use crate::core::AgentError;

/// 更换当前会话的 TTS 音色（同步接口，调用方负责放到阻塞线程池执行）
pub trait VoiceControl: Send + Sync {
    fn update_voice(&self, voice_id: &str) -> Result<(), AgentError>;
}

/// 记录当前音色与切换历史，并输出日志；控制台模式下代替真实 TTS
#[derive(Debug, Default)]
pub struct TrackingVoice {
    history: Mutex<Vec<String>>,
}

impl TrackingVoice {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            history: Mutex::new(vec![initial.into()]),
        }
    }

    pub fn current(&self) -> Option<String> {
        self.history.lock().ok().and_then(|h| h.last().cloned())
    }

    pub fn history(&self) -> Vec<String> {
        self.history.lock().map(|h| h.clone()).unwrap_or_default()
    }
}

impl VoiceControl for TrackingVoice {
    fn update_voice(&self, voice_id: &str) -> Result<(), AgentError> {
        let mut history = self
            .history
            .lock()
            .map_err(|e| AgentError::VoiceUpdate(e.to_string()))?;
        history.push(voice_id.to_string());
        tracing::info!(voice = %voice_id, "TTS voice changed");
        Ok(())
    }
}
