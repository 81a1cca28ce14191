//! 导师学习内容：概念列表（按文件中的顺序）

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::content::load_json_or_default;

/// 单个学习概念；id 为身份标识
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Concept {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub sample_question: String,
}

/// 只读的概念列表，保持加载顺序（首个概念用于自动选择）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TutorContent {
    concepts: Vec<Concept>,
}

impl TutorContent {
    pub fn new(concepts: Vec<Concept>) -> Self {
        Self { concepts }
    }

    /// 从 JSON 文件加载（顶层为概念数组）；失败时为空内容
    pub fn load(path: &Path) -> Self {
        let concepts: Vec<Concept> = load_json_or_default(path);
        tracing::info!(path = %path.display(), count = concepts.len(), "tutor content loaded");
        Self { concepts }
    }

    pub fn concepts(&self) -> &[Concept] {
        &self.concepts
    }

    pub fn get(&self, id: &str) -> Option<&Concept> {
        self.concepts.iter().find(|c| c.id == id)
    }

    pub fn first(&self) -> Option<&Concept> {
        self.concepts.first()
    }

    pub fn ids(&self) -> Vec<&str> {
        self.concepts.iter().map(|c| c.id.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.concepts.is_empty()
    }
}
