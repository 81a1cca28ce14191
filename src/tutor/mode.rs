//! 学习模式与音色映射

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 三种对话姿态，决定 Agent 的行为与 TTS 音色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Learn,
    Quiz,
    TeachBack,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Learn, Mode::Quiz, Mode::TeachBack];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Learn => "learn",
            Mode::Quiz => "quiz",
            Mode::TeachBack => "teach_back",
        }
    }

    /// 指令与回执中使用的大写标签
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Learn => "LEARN",
            Mode::Quiz => "QUIZ",
            Mode::TeachBack => "TEACH_BACK",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 模型传入了不认识的模式名
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid mode '{0}'. Please choose learn, quiz, or teach_back.")]
pub struct InvalidMode(pub String);

impl FromStr for Mode {
    type Err = InvalidMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "learn" => Ok(Mode::Learn),
            "quiz" => Ok(Mode::Quiz),
            "teach_back" => Ok(Mode::TeachBack),
            other => Err(InvalidMode(other.to_string())),
        }
    }
}

/// 模式 -> TTS 音色 id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceMap {
    learn: String,
    quiz: String,
    teach_back: String,
}

impl VoiceMap {
    pub fn new(learn: &str, quiz: &str, teach_back: &str) -> Self {
        Self {
            learn: learn.to_string(),
            quiz: quiz.to_string(),
            teach_back: teach_back.to_string(),
        }
    }

    pub fn voice_for(&self, mode: Mode) -> &str {
        match mode {
            Mode::Learn => &self.learn,
            Mode::Quiz => &self.quiz,
            Mode::TeachBack => &self.teach_back,
        }
    }
}

impl Default for VoiceMap {
    fn default() -> Self {
        Self::new("en-US-matthew", "en-US-alicia", "en-US-ken")
    }
}
