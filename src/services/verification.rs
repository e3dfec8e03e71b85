use crate::{
    error::ClientError, services::api::ApiClient, utils::validation::validate_verification_token,
};
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum VerificationStatus {
    #[default]
    Verifying,
    Success(String),
    Error(String),
}

impl VerificationStatus {
    pub fn is_finished(&self) -> bool {
        !matches!(self, VerificationStatus::Verifying)
    }
}

/// 验证链接页面：打开时处于 `Verifying`，请求结束后切换为结果
#[derive(Debug, Default)]
pub struct EmailVerification {
    status: VerificationStatus,
}

impl EmailVerification {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> &VerificationStatus {
        &self.status
    }

    pub async fn run(&mut self, api: &ApiClient, token: Option<&str>) -> &VerificationStatus {
        self.status = VerificationStatus::Verifying;
        self.status = verify_email(api, token).await;
        &self.status
    }
}

/// 处理邮件中的验证链接
pub async fn verify_email(api: &ApiClient, token: Option<&str>) -> VerificationStatus {
    let token = match validate_verification_token(token) {
        Ok(token) => token,
        Err(e) => return VerificationStatus::Error(e.user_message()),
    };

    match api.verify_email(token).await {
        Ok(response) => VerificationStatus::Success(response.message),
        Err(e) => {
            warn!("Email verification failed: {}", e);
            let message = match e {
                ClientError::Api { detail, .. } => detail,
                _ => "Verification failed".to_string(),
            };
            VerificationStatus::Error(message)
        }
    }
}
