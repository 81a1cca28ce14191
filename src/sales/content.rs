//! 销售知识库：公司信息、业务板块、FAQ

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::content::load_json_or_default;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyInfo {
    pub name: Option<String>,
    pub description: Option<String>,
    pub mission: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vertical {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Faq {
    pub question: String,
    pub answer: String,
}

/// 知识库文件根；任何字段缺失都取默认值
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SalesContent {
    pub company_info: CompanyInfo,
    pub verticals: Vec<Vertical>,
    pub faqs: Vec<Faq>,
}

impl SalesContent {
    pub fn load(path: &Path) -> Self {
        let content: SalesContent = load_json_or_default(path);
        tracing::info!(
            path = %path.display(),
            verticals = content.verticals.len(),
            faqs = content.faqs.len(),
            "sales content loaded"
        );
        content
    }

    /// 公司名；未配置时用中性称呼
    pub fn company_name(&self) -> &str {
        self.company_info.name.as_deref().unwrap_or("our company")
    }
}
