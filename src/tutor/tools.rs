//! 导师暴露给模型的工具：switch_mode / evaluate_teach_back

use std::sync::Arc;

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;
use tokio::sync::Mutex;

use crate::tools::{parameters_schema_for, parse_args, Tool};
use crate::tutor::TutorCoach;
use crate::voice::VoiceControl;

#[derive(Debug, Deserialize, JsonSchema)]
pub struct SwitchModeArgs {
    /// The mode to switch to: 'learn', 'quiz', or 'teach_back'
    pub mode: String,
    /// The id of the concept to focus on (e.g. 'variables', 'loops'). Omit to keep the current one or use the first available.
    #[serde(default)]
    pub concept_id: Option<String>,
}

/// switch_mode：切换学习模式与当前概念
pub struct SwitchModeTool {
    coach: Arc<Mutex<TutorCoach>>,
    voice: Arc<dyn VoiceControl>,
}

impl SwitchModeTool {
    pub fn new(coach: Arc<Mutex<TutorCoach>>, voice: Arc<dyn VoiceControl>) -> Self {
        Self { coach, voice }
    }
}

#[async_trait]
impl Tool for SwitchModeTool {
    fn name(&self) -> &str {
        "switch_mode"
    }

    fn description(&self) -> &str {
        "Switch the learning mode and/or active concept. Call it IMMEDIATELY when the user asks to \
        learn ('teach me', 'explain'), be quizzed ('quiz me', 'test me'), teach back ('I'll teach you'), \
        or mentions a new concept. Example: \"Quiz me on loops\" -> {\"mode\": \"quiz\", \"concept_id\": \"loops\"}"
    }

    fn parameters_schema(&self) -> Value {
        parameters_schema_for::<SwitchModeArgs>()
    }

    async fn execute(&self, args: Value) -> Result<String, String> {
        let args: SwitchModeArgs = parse_args(self.name(), args)?;
        let mut coach = self.coach.lock().await;
        Ok(coach
            .switch_mode(&args.mode, args.concept_id.as_deref(), &self.voice)
            .await)
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct EvaluateTeachBackArgs {
    /// The text of what the user said when explaining the concept
    pub user_explanation: String,
}

/// evaluate_teach_back：标记一次讲解评估事件，评分由模型完成
pub struct EvaluateTeachBackTool {
    coach: Arc<Mutex<TutorCoach>>,
}

impl EvaluateTeachBackTool {
    pub fn new(coach: Arc<Mutex<TutorCoach>>) -> Self {
        Self { coach }
    }
}

#[async_trait]
impl Tool for EvaluateTeachBackTool {
    fn name(&self) -> &str {
        "evaluate_teach_back"
    }

    fn description(&self) -> &str {
        "Evaluate the user's explanation in Teach-Back mode. Pass what the user said."
    }

    fn parameters_schema(&self) -> Value {
        parameters_schema_for::<EvaluateTeachBackArgs>()
    }

    async fn execute(&self, args: Value) -> Result<String, String> {
        let args: EvaluateTeachBackArgs = parse_args(self.name(), args)?;
        let coach = self.coach.lock().await;
        Ok(coach.evaluate_teach_back(&args.user_explanation))
    }
}
