//! Active Recall Coach 入口：初始化日志、加载配置与概念内容，在终端里跑一轮会话。

use std::sync::Arc;

use anyhow::Context;
use voice_agents::config::load_config;
use voice_agents::console::run_console;
use voice_agents::llm::create_llm_from_config;
use voice_agents::voice::{TrackingVoice, VoiceControl};
use voice_agents::{AgentSession, TutorAgent};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = voice_agents::observability::init();

    let result = run().await;
    if let Err(e) = &result {
        tracing::error!(error = ?e, "tutor agent exited with error");
    }
    result
}

async fn run() -> anyhow::Result<()> {
    let cfg = load_config(std::env::args().nth(1).map(Into::into)).context("Failed to load config")?;

    let voice = Arc::new(TrackingVoice::new(cfg.voices.learn.clone()));
    let voice_control: Arc<dyn VoiceControl> = voice.clone();
    let agent = Arc::new(TutorAgent::from_config(&cfg, voice_control));
    let initial_voice = agent.initial_voice().await;
    tracing::info!(voice = %initial_voice, "starting with learn voice");

    let session = AgentSession::new(agent, create_llm_from_config(&cfg), &cfg);
    run_console(session).await.context("Tutor session failed")?;

    tracing::info!(voices = ?voice.history(), "voices used");
    Ok(())
}
