//! 工具参数 JSON Schema 生成（schemars）
//!
//! 每个工具用一个 `#[derive(Deserialize, JsonSchema)]` 的参数结构体同时描述 schema 与解析逻辑，
//! 保证提示给模型的参数格式与实际解析一致。

use schemars::{schema_for, JsonSchema};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// 生成参数结构体的 JSON Schema（去掉 $schema / title 等与调用无关的元信息）
pub fn parameters_schema_for<T: JsonSchema>() -> Value {
    let schema = schema_for!(T);
    let mut value = serde_json::to_value(&schema).unwrap_or_else(|_| serde_json::json!({}));
    if let Some(obj) = value.as_object_mut() {
        obj.remove("$schema");
        obj.remove("title");
    }
    value
}

/// 将模型给出的 args 解析为参数结构体；失败时返回可读的错误，作为 Observation 回给模型
pub fn parse_args<T: DeserializeOwned>(tool: &str, args: Value) -> Result<T, String> {
    let args = if args.is_null() { serde_json::json!({}) } else { args };
    serde_json::from_value(args).map_err(|e| format!("Invalid arguments for {tool}: {e}"))
}
