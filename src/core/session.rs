//! 会话驱动：把用户的一句话变成 Agent 的一句回复
//!
//! 每次调用模型前都重新读取 Agent 指令（导师切换模式后指令会变），拼上工具清单；
//! 模型输出工具调用则执行并把 Observation 写回历史，再次规划，直到得到回复或达到步数上限。
//! 工具自身的失败以文本形式回给模型，不会中断会话。

use std::sync::Arc;
use std::time::Duration;

use crate::config::AppConfig;
use crate::core::planner::{parse_llm_output, PlannerOutput};
use crate::core::{AgentError, RecoveryAction, RecoveryEngine, VoiceAgent};
use crate::llm::LlmClient;
use crate::memory::{ConversationMemory, Message};
use crate::tools::ToolExecutor;

/// 单轮用户输入内最多调用模型的次数，防止工具调用死循环
pub const MAX_TOOL_STEPS: usize = 8;

/// 达到步数上限时回给用户的话；模型的原始输出只写日志
pub const STEP_LIMIT_REPLY: &str = "Sorry, I got stuck working on that. Could you say it another way?";

pub struct AgentSession {
    agent: Arc<dyn VoiceAgent>,
    llm: Arc<dyn LlmClient>,
    executor: ToolExecutor,
    recovery: RecoveryEngine,
    history: ConversationMemory,
    llm_timeout: Duration,
}

impl AgentSession {
    pub fn new(agent: Arc<dyn VoiceAgent>, llm: Arc<dyn LlmClient>, cfg: &AppConfig) -> Self {
        let executor = ToolExecutor::new(agent.tools(), cfg.tools.tool_timeout_secs);
        tracing::info!(agent = %agent.name(), tools = ?executor.tool_names(), "session created");
        Self {
            agent,
            llm,
            executor,
            recovery: RecoveryEngine::new(),
            history: ConversationMemory::new(cfg.app.max_context_turns),
            llm_timeout: Duration::from_secs(cfg.llm.timeout_secs.max(1)),
        }
    }

    pub fn agent_name(&self) -> &str {
        self.agent.name()
    }

    pub fn history(&self) -> &[Message] {
        self.history.messages()
    }

    /// 完整 system 指令：Agent 当前指令 + 工具清单与调用格式
    pub async fn system_prompt(&self) -> String {
        format!(
            "{}\n\n**TOOLS:**\n{}\n\nTo call a tool, reply with ONLY a JSON object: \
            {{\"tool\": \"<name>\", \"args\": {{...}}}}. The result comes back as \
            \"Observation from <tool>: ...\". Otherwise reply in plain spoken text.",
            self.agent.instructions().await,
            self.executor.registry().to_schema_json()
        )
    }

    /// 会话开场：不带用户输入让 Agent 先开口
    pub async fn start(&mut self) -> Result<String, AgentError> {
        self.run_turn().await
    }

    /// 处理一条用户输入并返回 Agent 回复
    pub async fn respond(&mut self, user_input: &str) -> Result<String, AgentError> {
        self.history.push(Message::user(user_input.to_string()));
        self.run_turn().await
    }

    async fn run_turn(&mut self) -> Result<String, AgentError> {
        let mut last_output = String::new();

        for step in 0..MAX_TOOL_STEPS {
            let output = match self.plan().await {
                Ok(o) => o,
                Err(e) => {
                    self.recover(e, None)?;
                    continue;
                }
            };
            last_output = output.clone();

            match parse_llm_output(&output) {
                Ok(PlannerOutput::Response(reply)) => {
                    self.history.push(Message::assistant(reply.clone()));
                    return Ok(reply);
                }
                Ok(PlannerOutput::ToolCall(tc)) => {
                    tracing::debug!(step, tool = %tc.tool, "tool call");
                    match self.executor.execute(&tc.tool, tc.args).await {
                        Ok(observation) => {
                            self.history.push_tool_exchange(&output, &tc.tool, &observation);
                        }
                        Err(e @ AgentError::HallucinatedTool(_)) => {
                            self.recover(e, Some(&output))?;
                        }
                        Err(e) => {
                            tracing::warn!(tool = %tc.tool, error = %e, "tool failed");
                            self.history
                                .push_tool_exchange(&output, &tc.tool, &format!("Error: {e}"));
                        }
                    }
                }
                Err(e) => self.recover(e, Some(&output))?,
            }
        }

        tracing::warn!(max_steps = MAX_TOOL_STEPS, last_output = %last_output, "tool step limit reached");
        self.history.push(Message::assistant(STEP_LIMIT_REPLY.to_string()));
        Ok(STEP_LIMIT_REPLY.to_string())
    }

    /// 交给 RecoveryEngine：可重试则把提示写入历史，否则返回错误终止本轮
    fn recover(&mut self, err: AgentError, raw_output: Option<&str>) -> Result<(), AgentError> {
        match self.recovery.handle(&err, &self.executor.tool_names()) {
            RecoveryAction::RetryWithPrompt(prompt) => {
                tracing::warn!(error = %err, "retrying turn");
                if let Some(raw) = raw_output {
                    self.history.push(Message::assistant(raw.to_string()));
                }
                self.history.push(Message::user(prompt));
                Ok(())
            }
            RecoveryAction::Abort => {
                tracing::error!(error = %err, "turn aborted");
                Err(err)
            }
        }
    }

    async fn plan(&self) -> Result<String, AgentError> {
        let mut messages = vec![Message::system(self.system_prompt().await)];
        messages.extend(self.history.messages().iter().cloned());
        match tokio::time::timeout(self.llm_timeout, self.llm.complete(&messages)).await {
            Ok(Ok(output)) => Ok(output),
            Ok(Err(e)) => Err(AgentError::LlmError(e)),
            Err(_) => Err(AgentError::NetworkTimeout),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::ScriptedLlmClient;
    use crate::sales::{LeadStore, SalesAgent, SalesContent};

    fn sales_session(store: LeadStore, llm: Arc<ScriptedLlmClient>) -> AgentSession {
        let agent = Arc::new(SalesAgent::new(SalesContent::default(), store));
        AgentSession::new(agent, llm, &AppConfig::default())
    }

    #[tokio::test]
    async fn test_tool_call_then_reply() {
        let dir = tempfile::tempdir().unwrap();
        let store = LeadStore::new(dir.path().join("leads.json"));
        let llm = Arc::new(ScriptedLlmClient::new([
            r#"{"tool": "save_lead", "args": {"name": "Asha", "company": "Northwind", "email": "a@n.test", "interest": "Retail"}}"#,
            "Thanks Asha, you're all set!",
        ]));
        let mut session = sales_session(store.clone(), llm.clone());

        let reply = session.respond("That's all, thanks").await.unwrap();
        assert_eq!(reply, "Thanks Asha, you're all set!");
        assert_eq!(store.load().unwrap().len(), 1);
        let history = session.history();
        assert_eq!(history.len(), 4);
        assert!(history[2].content.starts_with("Observation from save_lead: Lead saved successfully."));
        assert!(llm.system_prompts()[0].contains("\"name\": \"save_lead\""));
    }

    #[tokio::test]
    async fn test_unknown_tool_triggers_retry_prompt() {
        let dir = tempfile::tempdir().unwrap();
        let llm = Arc::new(ScriptedLlmClient::new([
            r#"{"tool": "book_meeting", "args": {}}"#,
            "Let me note that down instead.",
        ]));
        let mut session = sales_session(LeadStore::new(dir.path().join("leads.json")), llm);

        let reply = session.respond("Book a meeting").await.unwrap();
        assert_eq!(reply, "Let me note that down instead.");
        let retry = &session.history()[2];
        assert!(retry.content.contains("There is no tool named 'book_meeting'"));
        assert!(retry.content.contains("save_lead"));
    }

    #[tokio::test]
    async fn test_malformed_arguments_become_error_observation() {
        let dir = tempfile::tempdir().unwrap();
        let llm = Arc::new(ScriptedLlmClient::new([
            r#"{"tool": "save_lead", "args": {"name": "Asha"}}"#,
            "Could you share your email?",
        ]));
        let mut session = sales_session(LeadStore::new(dir.path().join("leads.json")), llm);

        let reply = session.respond("I'm Asha").await.unwrap();
        assert_eq!(reply, "Could you share your email?");
        assert!(session.history()[2]
            .content
            .starts_with("Observation from save_lead: Error: Tool execution failed: Invalid arguments"));
    }

    #[tokio::test]
    async fn test_llm_failure_aborts_turn() {
        let dir = tempfile::tempdir().unwrap();
        let llm = Arc::new(ScriptedLlmClient::new(Vec::<String>::new()));
        let mut session = sales_session(LeadStore::new(dir.path().join("leads.json")), llm);

        let err = session.respond("hello").await.unwrap_err();
        assert!(matches!(err, AgentError::LlmError(_)));
    }

    #[tokio::test]
    async fn test_step_limit_returns_fallback_reply() {
        let dir = tempfile::tempdir().unwrap();
        let call = r#"{"tool": "save_lead", "args": {}}"#;
        let llm = Arc::new(ScriptedLlmClient::new(vec![call; MAX_TOOL_STEPS]));
        let mut session = sales_session(LeadStore::new(dir.path().join("leads.json")), llm.clone());

        let reply = session.respond("hi").await.unwrap();
        assert_eq!(reply, STEP_LIMIT_REPLY);
        assert!(!reply.contains("\"tool\""));
        assert_eq!(llm.remaining(), 0);
        let last = session.history().last().unwrap();
        assert_eq!(last.content, STEP_LIMIT_REPLY);
    }
}
