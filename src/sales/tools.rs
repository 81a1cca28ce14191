//! 销售 Agent 暴露给模型的工具：save_lead

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;

use crate::sales::{Lead, LeadStore};
use crate::tools::{parameters_schema_for, parse_args, Tool};

/// 写盘失败时回给模型的文本（对话继续，不中断会话）
pub const SAVE_FAILED_REPLY: &str = "There was an error saving your details, but I have noted them down.";

#[derive(Debug, Deserialize, JsonSchema)]
pub struct SaveLeadArgs {
    /// Full name
    pub name: String,
    /// Company name
    pub company: String,
    /// Email address
    pub email: String,
    /// Area of interest (a business vertical or product)
    pub interest: String,
    /// Job role
    #[serde(default)]
    pub role: Option<String>,
    /// When they plan to buy or start
    #[serde(default)]
    pub timeline: Option<String>,
}

/// save_lead：把收集到的线索追加到线索文件
pub struct SaveLeadTool {
    store: LeadStore,
    company_name: String,
}

impl SaveLeadTool {
    pub fn new(store: LeadStore, company_name: impl Into<String>) -> Self {
        Self {
            store,
            company_name: company_name.into(),
        }
    }

    /// 在阻塞线程池中保存线索，文件读写不占用事件循环
    pub async fn save(&self, args: SaveLeadArgs) -> String {
        let store = self.store.clone();
        let company_name = self.company_name.clone();
        match tokio::task::spawn_blocking(move || save_blocking(&store, &company_name, &args)).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::error!(error = %e, path = %self.store.path().display(), "Lead save task failed");
                SAVE_FAILED_REPLY.to_string()
            }
        }
    }
}

/// 保存一条线索；任何 I/O 或序列化错误都记录日志并返回致歉文本
fn save_blocking(store: &LeadStore, company_name: &str, args: &SaveLeadArgs) -> String {
    let lead = Lead::new(
        &args.name,
        &args.company,
        &args.email,
        &args.interest,
        args.role.as_deref(),
        args.timeline.as_deref(),
    );
    match store.append(&lead) {
        Ok(total) => {
            tracing::info!(name = %lead.name, company = %lead.company, total, "Lead saved");
            format!("Lead saved successfully. Thank you for your interest in {company_name}.")
        }
        Err(e) => {
            tracing::error!(error = %e, path = %store.path().display(), "Error saving lead");
            SAVE_FAILED_REPLY.to_string()
        }
    }
}

#[async_trait]
impl Tool for SaveLeadTool {
    fn name(&self) -> &str {
        "save_lead"
    }

    fn description(&self) -> &str {
        "Save the lead's information. Call this at the end of the conversation, after summarizing what you recorded."
    }

    fn parameters_schema(&self) -> Value {
        parameters_schema_for::<SaveLeadArgs>()
    }

    async fn execute(&self, args: Value) -> Result<String, String> {
        let args: SaveLeadArgs = parse_args(self.name(), args)?;
        Ok(self.save(args).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sales::NOT_SPECIFIED;

    fn args() -> Value {
        serde_json::json!({
            "name": "Asha Rao",
            "company": "Northwind",
            "email": "asha@northwind.test",
            "interest": "Digital services"
        })
    }

    #[tokio::test]
    async fn test_save_lead_persists_and_confirms() {
        let dir = tempfile::tempdir().unwrap();
        let store = LeadStore::new(dir.path().join("leads.json"));
        let tool = SaveLeadTool::new(store.clone(), "Acme Group");

        let reply = tool.execute(args()).await.unwrap();
        assert_eq!(reply, "Lead saved successfully. Thank you for your interest in Acme Group.");
        let leads = store.load().unwrap();
        assert_eq!(leads.len(), 1);
        assert_eq!(leads[0].company, "Northwind");
        assert_eq!(leads[0].role, NOT_SPECIFIED);
    }

    #[tokio::test]
    async fn test_save_lead_io_failure_returns_apology() {
        let dir = tempfile::tempdir().unwrap();
        let tool = SaveLeadTool::new(LeadStore::new(dir.path()), "Acme Group");
        let reply = tool.execute(args()).await.unwrap();
        assert_eq!(reply, SAVE_FAILED_REPLY);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_save_on_single_threaded_runtime() {
        let dir = tempfile::tempdir().unwrap();
        let store = LeadStore::new(dir.path().join("leads.json"));
        let tool = SaveLeadTool::new(store.clone(), "Acme Group");

        for name in ["Asha Rao", "Ravi Iyer"] {
            let mut args: SaveLeadArgs = serde_json::from_value(args()).unwrap();
            args.name = name.to_string();
            assert!(tool.save(args).await.starts_with("Lead saved successfully."));
        }
        let leads = store.load().unwrap();
        assert_eq!(leads.len(), 2);
        assert_eq!(leads[1].name, "Ravi Iyer");
    }

    #[tokio::test]
    async fn test_save_lead_requires_email() {
        let dir = tempfile::tempdir().unwrap();
        let store = LeadStore::new(dir.path().join("leads.json"));
        let tool = SaveLeadTool::new(store.clone(), "Acme Group");
        let err = tool
            .execute(serde_json::json!({"name": "A", "company": "B", "interest": "C"}))
            .await
            .unwrap_err();
        assert!(err.contains("email"));
        assert!(!store.path().exists());
    }
}
