//! 文本模式交互循环
//!
//! 标准输入一行即一轮用户发言，Agent 回复打印到标准输出；`/quit` 或 EOF 结束会话。
//! 单轮失败只记录日志并提示用户重试，读写终端失败则向上返回，由入口决定退出。

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::core::AgentSession;

const TURN_FAILED_REPLY: &str = "Sorry, I ran into a problem there. Could you say that again?";

pub async fn run_console(mut session: AgentSession) -> anyhow::Result<()> {
    let mut stdout = tokio::io::stdout();
    let name = session.agent_name().to_string();

    match session.start().await {
        Ok(greeting) => say(&mut stdout, &name, &greeting).await?,
        Err(e) => tracing::error!(error = %e, "opening turn failed"),
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        stdout.write_all(b"you> ").await.context("write prompt")?;
        stdout.flush().await.context("flush stdout")?;

        let Some(line) = lines.next_line().await.context("read stdin")? else {
            break;
        };
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if matches!(input, "/quit" | "/exit") {
            break;
        }

        match session.respond(input).await {
            Ok(reply) => say(&mut stdout, &name, &reply).await?,
            Err(e) => {
                tracing::error!(error = %e, "turn failed");
                say(&mut stdout, &name, TURN_FAILED_REPLY).await?;
            }
        }
    }

    tracing::info!(agent = %name, turns = session.history().len(), "session ended");
    Ok(())
}

async fn say(stdout: &mut tokio::io::Stdout, name: &str, text: &str) -> anyhow::Result<()> {
    stdout
        .write_all(format!("{name}> {text}\n").as_bytes())
        .await
        .context("write reply")
}
