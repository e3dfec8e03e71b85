use std::future::Future;

use crate::error::ClientError;

/// 一次性加载的页面数据
#[derive(Debug, Clone, PartialEq)]
pub enum Resource<T> {
    Pending,
    Ready(T),
    Failed(String),
}

impl<T> Default for Resource<T> {
    fn default() -> Self {
        Resource::Pending
    }
}

impl<T> Resource<T> {
    /// 等待加载结果；失败时保存面向用户的错误信息
    pub async fn load<F>(fut: F) -> Self
    where
        F: Future<Output = Result<T, ClientError>>,
    {
        Self::from_result(fut.await)
    }

    pub fn from_result(result: Result<T, ClientError>) -> Self {
        match result {
            Ok(data) => Resource::Ready(data),
            Err(e) => {
                tracing::warn!("Resource failed to load: {}", e);
                Resource::Failed(e.user_message())
            }
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Resource::Pending)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Resource::Ready(_))
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Resource::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Resource::Failed(msg) => Some(msg),
            _ => None,
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Resource<U> {
        match self {
            Resource::Pending => Resource::Pending,
            Resource::Ready(data) => Resource::Ready(f(data)),
            Resource::Failed(msg) => Resource::Failed(msg),
        }
    }
}
