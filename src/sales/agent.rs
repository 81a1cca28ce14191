//! 销售 SDR Agent：知识库指令 + save_lead 工具

use async_trait::async_trait;

use crate::config::AppConfig;
use crate::core::VoiceAgent;
use crate::sales::instructions::render_instructions;
use crate::sales::{LeadStore, SalesContent, SaveLeadTool};
use crate::tools::ToolRegistry;

pub struct SalesAgent {
    content: SalesContent,
    store: LeadStore,
    instructions: String,
}

impl SalesAgent {
    pub fn new(content: SalesContent, store: LeadStore) -> Self {
        let instructions = render_instructions(&content);
        Self {
            content,
            store,
            instructions,
        }
    }

    pub fn from_config(cfg: &AppConfig) -> Self {
        Self::new(
            SalesContent::load(&cfg.content.sales_path),
            LeadStore::new(&cfg.content.leads_path),
        )
    }

    pub fn content(&self) -> &SalesContent {
        &self.content
    }

    pub fn store(&self) -> &LeadStore {
        &self.store
    }
}

#[async_trait]
impl VoiceAgent for SalesAgent {
    fn name(&self) -> &str {
        "sales"
    }

    async fn instructions(&self) -> String {
        self.instructions.clone()
    }

    fn tools(&self) -> ToolRegistry {
        let mut tools = ToolRegistry::new();
        tools.register(SaveLeadTool::new(self.store.clone(), self.content.company_name()));
        tools
    }
}
