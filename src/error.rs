use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClientError>;

const NOT_AUTHENTICATED: &str = "Not authenticated";

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error ({status}): {detail}")]
    Api { status: u16, detail: String },

    #[error("Authentication error: {0}")]
    Unauthorized(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Validation error: {0}")]
    ValidatorError(#[from] validator::ValidationErrors),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

// 便利函数，用于创建常见错误
impl ClientError {
    pub fn api(status: StatusCode, detail: impl Into<String>) -> Self {
        Self::Api {
            status: status.as_u16(),
            detail: detail.into(),
        }
    }

    pub fn unauthorized(msg: &str) -> Self {
        Self::Unauthorized(msg.to_string())
    }

    pub fn validation(msg: &str) -> Self {
        Self::Validation(msg.to_string())
    }

    pub fn config(msg: &str) -> Self {
        Self::Config(msg.to_string())
    }

    pub fn internal(msg: &str) -> Self {
        Self::Internal(msg.to_string())
    }

    /// 会话失效（需要重新登录）
    ///
    /// 缺少 Authorization 头时后端返回 403 "Not authenticated"，同样视为未登录。
    pub fn is_unauthorized(&self) -> bool {
        match self {
            ClientError::Unauthorized(_) => true,
            ClientError::Api { status, detail } => {
                *status == StatusCode::UNAUTHORIZED.as_u16()
                    || (*status == StatusCode::FORBIDDEN.as_u16() && detail == NOT_AUTHENTICATED)
            }
            _ => false,
        }
    }

    /// 面向用户的提示文本；后端的 `detail` 优先
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Api { detail, .. } => detail.clone(),
            ClientError::Unauthorized(msg) | ClientError::Validation(msg) => msg.clone(),
            ClientError::ValidatorError(e) => e
                .field_errors()
                .keys()
                .map(|field| format!("Invalid {}", field))
                .collect::<Vec<_>>()
                .join(", "),
            ClientError::Request(_) => "Network error, please try again".to_string(),
            _ => "Something went wrong".to_string(),
        }
    }
}

// 从其他错误类型转换
impl From<anyhow::Error> for ClientError {
    fn from(err: anyhow::Error) -> Self {
        ClientError::Internal(err.to_string())
    }
}
