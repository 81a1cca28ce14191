//! Active Recall Coach：模式/概念状态机
//!
//! switch_mode 先做完整校验（模式、概念）再一次性提交，任何一项无效都不改状态；
//! 提交后立即重新生成指令，再切换 TTS 音色（失败只记日志，最多等待 voice_timeout），
//! 最后返回一段告诉模型下一步做什么的指示文本。

use std::sync::Arc;
use std::time::Duration;

use crate::tutor::instructions::render_instructions;
use crate::tutor::{Concept, Mode, TutorContent, TutorState, VoiceMap};
use crate::voice::VoiceControl;

/// evaluate_teach_back 的固定回执；评分交给模型按 TEACH-BACK 指令完成
pub const TEACH_BACK_ACK: &str = "Explanation received. Please provide feedback to the user.";

/// 等待音色切换的上限；低于 ToolExecutor 的最小超时（1 秒），慢 TTS 不会拖垮 switch_mode
pub const VOICE_UPDATE_TIMEOUT: Duration = Duration::from_millis(500);

/// 校验失败的原因，Display 即返回给模型的文本
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SwitchRejected {
    #[error("{0}")]
    InvalidMode(#[from] crate::tutor::InvalidMode),
    #[error("Concept '{requested}' not found. Available: {}", .available.join(", "))]
    UnknownConcept {
        requested: String,
        available: Vec<String>,
    },
}

/// 导师状态机：只读内容 + 音色表 + 可变状态 + 当前指令
#[derive(Debug)]
pub struct TutorCoach {
    content: TutorContent,
    voices: VoiceMap,
    state: TutorState,
    instructions: String,
    voice_timeout: Duration,
}

impl TutorCoach {
    pub fn new(content: TutorContent, voices: VoiceMap) -> Self {
        let state = TutorState::default();
        let instructions = render_instructions(&content, &state);
        Self {
            content,
            voices,
            state,
            instructions,
            voice_timeout: VOICE_UPDATE_TIMEOUT,
        }
    }

    pub fn with_voice_timeout(mut self, voice_timeout: Duration) -> Self {
        self.voice_timeout = voice_timeout;
        self
    }

    pub fn state(&self) -> &TutorState {
        &self.state
    }

    pub fn content(&self) -> &TutorContent {
        &self.content
    }

    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    pub fn current_voice(&self) -> &str {
        self.voices.voice_for(self.state.mode)
    }

    pub fn current_concept(&self) -> Option<&Concept> {
        self.state
            .concept_id
            .as_deref()
            .and_then(|id| self.content.get(id))
    }

    /// 计算切换后的状态，不修改 self；空字符串的 concept_id 视为未提供
    pub fn plan_switch(&self, mode: &str, concept_id: Option<&str>) -> Result<TutorState, SwitchRejected> {
        let mode: Mode = mode.parse()?;
        let requested = concept_id.map(str::trim).filter(|id| !id.is_empty());

        let concept_id = match requested {
            Some(id) => match self.content.get(id) {
                Some(c) => Some(c.id.clone()),
                None => {
                    return Err(SwitchRejected::UnknownConcept {
                        requested: id.to_string(),
                        available: self.content.ids().into_iter().map(String::from).collect(),
                    })
                }
            },
            None => match &self.state.concept_id {
                Some(current) => Some(current.clone()),
                None => self.content.first().map(|c| c.id.clone()),
            },
        };

        Ok(TutorState { mode, concept_id })
    }

    /// 切换模式和/或概念；返回给模型的文本（成功为指示，失败为原因）
    pub async fn switch_mode(
        &mut self,
        mode: &str,
        concept_id: Option<&str>,
        voice: &Arc<dyn VoiceControl>,
    ) -> String {
        let next = match self.plan_switch(mode, concept_id) {
            Ok(next) => next,
            Err(rejected) => {
                tracing::warn!(mode = %mode, concept_id = ?concept_id, reason = %rejected, "switch_mode rejected");
                return rejected.to_string();
            }
        };

        if self.state.concept_id.is_none() && concept_id.map_or(true, |id| id.trim().is_empty()) {
            if let Some(id) = &next.concept_id {
                tracing::info!(concept = %id, "Auto-selected first concept");
            }
        }

        let old_mode = self.state.mode;
        self.state = next;
        self.instructions = render_instructions(&self.content, &self.state);
        let voice_id = self.current_voice().to_string();
        tracing::info!(
            from = %old_mode,
            to = %self.state.mode,
            voice = %voice_id,
            concept = ?self.state.concept_id,
            "mode switch"
        );

        let directive = self.directive(&voice_id);
        update_voice(voice, &voice_id, self.voice_timeout).await;
        directive
    }

    /// 接收用户的讲解；不做校验或评分
    pub fn evaluate_teach_back(&self, explanation: &str) -> String {
        tracing::debug!(
            chars = explanation.chars().count(),
            concept = ?self.state.concept_id,
            "teach-back explanation received"
        );
        TEACH_BACK_ACK.to_string()
    }

    fn directive(&self, voice_id: &str) -> String {
        let concept = self.current_concept();
        let title = concept.map(|c| c.title.as_str()).unwrap_or("Unknown Concept");
        let mut response = format!(
            "Mode switched to {}. Voice is now {}. Concept is {}.\n\n",
            self.state.mode.label(),
            voice_id,
            title
        );

        match (self.state.mode, concept) {
            (Mode::Learn, Some(c)) => {
                response.push_str(&format!(
                    "ACTION REQUIRED: Explain the concept '{}' to the user using this summary:\n'{}'\nThen ask if they want to be quizzed.",
                    c.title, c.summary
                ));
            }
            (Mode::Quiz, Some(c)) => {
                response.push_str(&format!(
                    "ACTION REQUIRED: Ask the user this question (or similar) to test their knowledge:\n'{}'",
                    c.sample_question
                ));
            }
            (Mode::TeachBack, _) => {
                response.push_str(&format!(
                    "ACTION REQUIRED: Ask the user to explain '{}' to you in their own words. Listen carefully.",
                    title
                ));
            }
            _ => {}
        }
        response
    }
}

/// 在阻塞线程池中切换音色，避免卡住事件循环；失败（含 panic）只记录日志。
/// 超过 wait 仍未完成时不再等待，切换在后台继续，结果照常记录。
async fn update_voice(voice: &Arc<dyn VoiceControl>, voice_id: &str, wait: Duration) {
    let voice = Arc::clone(voice);
    let id = voice_id.to_string();
    let task = tokio::spawn(async move {
        let target = id.clone();
        match tokio::task::spawn_blocking(move || voice.update_voice(&target)).await {
            Ok(Ok(())) => tracing::info!(voice = %id, "Voice updated successfully"),
            Ok(Err(e)) => tracing::error!(error = %e, voice = %id, "Failed to update voice options"),
            Err(e) => tracing::error!(error = %e, voice = %id, "Voice update task failed"),
        }
    });

    if tokio::time::timeout(wait, task).await.is_err() {
        tracing::warn!(
            voice = %voice_id,
            wait_ms = wait.as_millis() as u64,
            "Voice update still pending, continuing in background"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::AgentError;
    use crate::voice::TrackingVoice;

    struct FailingVoice;

    impl VoiceControl for FailingVoice {
        fn update_voice(&self, _voice_id: &str) -> Result<(), AgentError> {
            Err(AgentError::VoiceUpdate("tts offline".to_string()))
        }
    }

    struct PanickingVoice;

    impl VoiceControl for PanickingVoice {
        fn update_voice(&self, _voice_id: &str) -> Result<(), AgentError> {
            panic!("tts plugin crashed");
        }
    }

    /// 阻塞 delay 后才完成的音色切换
    struct SlowVoice {
        delay: Duration,
    }

    impl VoiceControl for SlowVoice {
        fn update_voice(&self, _voice_id: &str) -> Result<(), AgentError> {
            std::thread::sleep(self.delay);
            Ok(())
        }
    }

    fn concept(id: &str, title: &str) -> Concept {
        Concept {
            id: id.to_string(),
            title: title.to_string(),
            summary: format!("{title} summary"),
            sample_question: format!("What are {id}?"),
        }
    }

    fn coach() -> TutorCoach {
        TutorCoach::new(
            TutorContent::new(vec![concept("variables", "Variables"), concept("loops", "Loops")]),
            VoiceMap::default(),
        )
    }

    fn tracking() -> (Arc<TrackingVoice>, Arc<dyn VoiceControl>) {
        let voice = Arc::new(TrackingVoice::new("en-US-matthew"));
        let dyn_voice: Arc<dyn VoiceControl> = voice.clone();
        (voice, dyn_voice)
    }

    #[tokio::test]
    async fn test_every_valid_mode_is_applied() {
        let markers = [
            ("learn", Mode::Learn, "**LEARN Mode**"),
            ("quiz", Mode::Quiz, "**QUIZ Mode**"),
            ("teach_back", Mode::TeachBack, "**TEACH-BACK Mode**"),
        ];
        for (name, mode, marker) in markers {
            let mut coach = coach();
            let (_, voice) = tracking();
            let reply = coach.switch_mode(name, None, &voice).await;
            assert_eq!(coach.state().mode, mode);
            assert!(coach.instructions().contains(marker));
            assert!(reply.starts_with(&format!("Mode switched to {}.", mode.label())));
        }
    }

    #[tokio::test]
    async fn test_quiz_on_loops_returns_sample_question() {
        let mut coach = coach();
        let (tracker, voice) = tracking();
        let reply = coach.switch_mode("quiz", Some("loops"), &voice).await;
        assert_eq!(
            coach.state(),
            &TutorState {
                mode: Mode::Quiz,
                concept_id: Some("loops".to_string())
            }
        );
        assert!(reply.contains("'What are loops?'"));
        assert!(reply.contains("Voice is now en-US-alicia"));
        assert_eq!(tracker.current().as_deref(), Some("en-US-alicia"));
    }

    #[tokio::test]
    async fn test_invalid_mode_leaves_state_unchanged() {
        let mut coach = coach();
        let (tracker, voice) = tracking();
        let before = coach.instructions().to_string();
        let reply = coach.switch_mode("lecture", Some("loops"), &voice).await;
        assert!(reply.starts_with("Invalid mode 'lecture'"));
        assert_eq!(coach.state(), &TutorState::default());
        assert_eq!(coach.instructions(), before);
        assert_eq!(tracker.history().len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_concept_is_all_or_nothing() {
        let mut coach = coach();
        let (_, voice) = tracking();
        coach.switch_mode("learn", Some("variables"), &voice).await;

        let reply = coach.switch_mode("quiz", Some("recursion"), &voice).await;
        assert_eq!(reply, "Concept 'recursion' not found. Available: variables, loops");
        assert_eq!(coach.state().mode, Mode::Learn);
        assert_eq!(coach.state().concept_id.as_deref(), Some("variables"));
    }

    #[tokio::test]
    async fn test_auto_selects_first_concept() {
        let mut coach = coach();
        let (_, voice) = tracking();
        let reply = coach.switch_mode("learn", None, &voice).await;
        assert_eq!(coach.state().concept_id.as_deref(), Some("variables"));
        assert!(reply.contains("Explain the concept 'Variables'"));
        assert!(reply.contains("'Variables summary'"));
    }

    #[tokio::test]
    async fn test_keeps_current_concept_when_omitted() {
        let mut coach = coach();
        let (_, voice) = tracking();
        coach.switch_mode("learn", Some("loops"), &voice).await;
        let reply = coach.switch_mode("teach_back", Some("  "), &voice).await;
        assert_eq!(coach.state().concept_id.as_deref(), Some("loops"));
        assert!(reply.contains("Ask the user to explain 'Loops'"));
    }

    #[tokio::test]
    async fn test_voice_failure_does_not_fail_switch() {
        let mut coach = coach();
        let voice: Arc<dyn VoiceControl> = Arc::new(FailingVoice);
        let reply = coach.switch_mode("teach_back", Some("loops"), &voice).await;
        assert!(reply.starts_with("Mode switched to TEACH_BACK. Voice is now en-US-ken."));
        assert_eq!(coach.state().mode, Mode::TeachBack);
        assert!(coach.instructions().contains("**TEACH-BACK Mode**"));
    }

    #[tokio::test]
    async fn test_panicking_voice_does_not_fail_switch() {
        let mut coach = coach();
        let voice: Arc<dyn VoiceControl> = Arc::new(PanickingVoice);
        let reply = coach.switch_mode("quiz", Some("loops"), &voice).await;
        assert!(reply.starts_with("Mode switched to QUIZ. Voice is now en-US-alicia."));
        assert!(reply.contains("'What are loops?'"));
        assert_eq!(coach.state().mode, Mode::Quiz);
        assert!(coach.instructions().contains("**QUIZ Mode**"));
        assert!(!coach.instructions().contains("**INITIAL GREETING**"));
    }

    #[tokio::test]
    async fn test_slow_voice_is_not_awaited_past_timeout() {
        let mut coach = coach().with_voice_timeout(Duration::from_millis(50));
        let voice: Arc<dyn VoiceControl> = Arc::new(SlowVoice {
            delay: Duration::from_millis(800),
        });
        let started = std::time::Instant::now();
        let reply = coach.switch_mode("learn", Some("loops"), &voice).await;
        assert!(started.elapsed() < Duration::from_millis(600));
        assert!(reply.contains("Explain the concept 'Loops'"));
        assert_eq!(coach.state().concept_id.as_deref(), Some("loops"));
        assert!(coach.instructions().contains("**LEARN Mode**"));
        assert!(coach.instructions().contains("**CURRENT CONCEPT:** Loops (loops)"));
    }

    #[tokio::test]
    async fn test_empty_content_switch_reports_unknown_concept_title() {
        let mut coach = TutorCoach::new(TutorContent::default(), VoiceMap::default());
        let (_, voice) = tracking();
        let reply = coach.switch_mode("quiz", None, &voice).await;
        assert_eq!(coach.state().concept_id, None);
        assert!(reply.contains("Concept is Unknown Concept."));
        assert!(!reply.contains("ACTION REQUIRED"));
    }

    #[test]
    fn test_evaluate_teach_back_acknowledges() {
        let coach = coach();
        assert_eq!(coach.evaluate_teach_back("A loop repeats code."), TEACH_BACK_ACK);
        assert_eq!(coach.evaluate_teach_back(""), TEACH_BACK_ACK);
    }
}
