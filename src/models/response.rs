use serde::{Deserialize, Serialize};

/// 后端的通用确认响应，例如 `{"message": "Notification marked as read"}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

/// 后端错误格式：`{"detail": "..."}`
///
/// 校验失败时 `detail` 是一个对象数组，这里统一转成字符串。
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub detail: serde_json::Value,
}

impl ErrorResponse {
    pub fn message(&self) -> String {
        match &self.detail {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Array(items) => items
                .iter()
                .filter_map(|item| item.get("msg").and_then(|m| m.as_str()))
                .collect::<Vec<_>>()
                .join("; "),
            other => other.to_string(),
        }
    }
}
