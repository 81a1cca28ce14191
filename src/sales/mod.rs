//! 销售 SDR：回答公司/业务/FAQ 问题，收集并保存线索

pub mod agent;
pub mod content;
pub mod instructions;
pub mod lead;
pub mod tools;

pub use agent::SalesAgent;
pub use content::{CompanyInfo, Faq, SalesContent, Vertical};
pub use instructions::render_instructions;
pub use lead::{Lead, LeadStore, NOT_SPECIFIED};
pub use tools::{SaveLeadArgs, SaveLeadTool, SAVE_FAILED_REPLY};
