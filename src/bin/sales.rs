//! 销售 SDR 入口：初始化日志、加载配置与知识库，在终端里跑一轮会话。

use std::sync::Arc;

use anyhow::Context;
use voice_agents::config::load_config;
use voice_agents::console::run_console;
use voice_agents::llm::create_llm_from_config;
use voice_agents::{AgentSession, SalesAgent};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = voice_agents::observability::init();

    let result = run().await;
    if let Err(e) = &result {
        tracing::error!(error = ?e, "sales agent exited with error");
    }
    result
}

async fn run() -> anyhow::Result<()> {
    let cfg = load_config(std::env::args().nth(1).map(Into::into)).context("Failed to load config")?;

    let agent = Arc::new(SalesAgent::from_config(&cfg));
    tracing::info!(
        company = %agent.content().company_name(),
        leads = %agent.store().path().display(),
        "starting sales agent"
    );

    let session = AgentSession::new(agent, create_llm_from_config(&cfg), &cfg);
    run_console(session).await.context("Sales session failed")
}
