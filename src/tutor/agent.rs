//! 导师 Agent：把状态机、音色能力与工具组装成 VoiceAgent

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::config::AppConfig;
use crate::core::VoiceAgent;
use crate::tools::ToolRegistry;
use crate::tutor::{EvaluateTeachBackTool, SwitchModeTool, TutorCoach, TutorContent, TutorState, VoiceMap};
use crate::voice::VoiceControl;

/// Active Recall Coach；状态在 Agent 与其工具之间共享，会话结束即丢弃
pub struct TutorAgent {
    coach: Arc<Mutex<TutorCoach>>,
    voice: Arc<dyn VoiceControl>,
}

impl TutorAgent {
    pub fn new(content: TutorContent, voices: VoiceMap, voice: Arc<dyn VoiceControl>) -> Self {
        Self {
            coach: Arc::new(Mutex::new(TutorCoach::new(content, voices))),
            voice,
        }
    }

    /// 按配置加载概念文件与音色表
    pub fn from_config(cfg: &AppConfig, voice: Arc<dyn VoiceControl>) -> Self {
        let content = TutorContent::load(&cfg.content.tutor_path);
        Self::new(content, cfg.voices.tutor_voice_map(), voice)
    }

    /// 会话开始时使用的音色（learn 模式）
    pub async fn initial_voice(&self) -> String {
        self.coach.lock().await.current_voice().to_string()
    }

    pub async fn state(&self) -> TutorState {
        self.coach.lock().await.state().clone()
    }

    pub fn coach(&self) -> Arc<Mutex<TutorCoach>> {
        Arc::clone(&self.coach)
    }
}

#[async_trait]
impl VoiceAgent for TutorAgent {
    fn name(&self) -> &str {
        "tutor"
    }

    async fn instructions(&self) -> String {
        self.coach.lock().await.instructions().to_string()
    }

    fn tools(&self) -> ToolRegistry {
        let mut tools = ToolRegistry::new();
        tools.register(SwitchModeTool::new(self.coach(), Arc::clone(&self.voice)));
        tools.register(EvaluateTeachBackTool::new(self.coach()));
        tools
    }
}
