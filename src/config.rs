//! 应用配置：从 config/default.toml 与环境变量加载
//!
//! 加载顺序：先读 TOML 文件，再用环境变量 `VOICE__*` 覆盖（双下划线表示嵌套，如 `VOICE__VOICES__QUIZ=en-US-natalie`）。
//! 所有字段都有默认值，没有任何配置文件时也能启动。

use std::path::PathBuf;

use serde::Deserialize;

use crate::tutor::{Mode, VoiceMap};

/// 应用配置根（对应 config/default.toml 的顶层）
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub app: AppSection,
    pub content: ContentSection,
    pub voices: VoicesSection,
    pub llm: LlmSection,
    pub tools: ToolsSection,
}

/// [app] 段：应用名、对话轮数上限
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppSection {
    pub name: Option<String>,
    /// 对话历史保留轮数
    pub max_context_turns: usize,
}

impl Default for AppSection {
    fn default() -> Self {
        Self {
            name: None,
            max_context_turns: 20,
        }
    }
}

/// [content] 段：导师概念文件、销售知识库文件、线索落盘文件
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ContentSection {
    pub tutor_path: PathBuf,
    pub sales_path: PathBuf,
    pub leads_path: PathBuf,
}

impl Default for ContentSection {
    fn default() -> Self {
        Self {
            tutor_path: PathBuf::from("shared-data/tutor_content.json"),
            sales_path: PathBuf::from("shared-data/sales_content.json"),
            leads_path: PathBuf::from("shared-data/leads.json"),
        }
    }
}

/// [voices] 段：导师每个模式对应的 TTS 音色
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VoicesSection {
    pub learn: String,
    pub quiz: String,
    pub teach_back: String,
}

impl Default for VoicesSection {
    fn default() -> Self {
        let map = VoiceMap::default();
        Self {
            learn: map.voice_for(Mode::Learn).to_string(),
            quiz: map.voice_for(Mode::Quiz).to_string(),
            teach_back: map.voice_for(Mode::TeachBack).to_string(),
        }
    }
}

impl VoicesSection {
    pub fn tutor_voice_map(&self) -> VoiceMap {
        VoiceMap::new(&self.learn, &self.quiz, &self.teach_back)
    }
}

/// [llm] 段：后端选择与超时
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmSection {
    /// 后端：openai（任意 OpenAI 兼容端点）/ mock
    pub provider: String,
    pub model: String,
    pub base_url: Option<String>,
    /// 单次模型调用超时（秒）
    pub timeout_secs: u64,
}

impl Default for LlmSection {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            model: "gpt-4o-mini".to_string(),
            base_url: None,
            timeout_secs: 60,
        }
    }
}

/// [tools] 段：单次工具调用超时
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ToolsSection {
    pub tool_timeout_secs: u64,
}

impl Default for ToolsSection {
    fn default() -> Self {
        Self {
            tool_timeout_secs: 30,
        }
    }
}

/// 从 config 目录加载配置，环境变量 VOICE__* 可覆盖
///
/// 1. 按顺序查找 config/default.toml、../config/default.toml，找到则作为第一源
/// 2. 若传入 config_path 且文件存在，则追加该文件（可覆盖前面的键）
/// 3. 最后叠加环境变量 VOICE__*（双下划线表示嵌套键）
pub fn load_config(config_path: Option<PathBuf>) -> Result<AppConfig, config::ConfigError> {
    let mut builder = config::Config::builder();

    for name in ["config/default", "../config/default"] {
        if std::path::Path::new(&format!("{name}.toml")).exists() {
            builder = builder.add_source(config::File::with_name(name).required(false));
            break;
        }
    }

    if let Some(path) = config_path {
        if path.exists() {
            builder = builder.add_source(config::File::from(path).required(false));
        } else {
            tracing::warn!(path = %path.display(), "config file not found, skipping");
        }
    }

    builder = builder.add_source(
        config::Environment::with_prefix("VOICE")
            .separator("__")
            .try_parsing(true),
    );

    builder.build()?.try_deserialize()
}
