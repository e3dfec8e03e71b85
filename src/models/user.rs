use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub age: Option<u32>,
    pub mobile: Option<String>,
    pub citizenship: Option<String>,
    pub language: Option<String>,
    #[serde(default)]
    pub role: UserRole,
    pub trade: Option<String>,
    pub created_at: String,
    pub vax_status: Option<bool>,
    #[serde(default)]
    pub email_verified: bool,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    Client,
    Provider,
    Admin,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,
}

/// 注册表单
///
/// 只有在用户同意共享疫苗信息时才提交 `vax_status`。
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(length(min = 6))]
    pub password: String,

    #[validate(range(min = 1, max = 150))]
    pub age: Option<u32>,

    #[validate(length(max = 30))]
    pub mobile: Option<String>,

    pub citizenship: Option<String>,

    pub language: String,

    pub role: UserRole,

    pub trade: Option<String>,

    pub vax_status: Option<bool>,

    pub credit_card: Option<String>,

    pub consent_vax: bool,

    pub consent_data: bool,
}

impl Default for RegisterRequest {
    fn default() -> Self {
        Self {
            email: String::new(),
            name: String::new(),
            password: String::new(),
            age: None,
            mobile: None,
            citizenship: None,
            language: "English".to_string(),
            role: UserRole::Client,
            trade: None,
            vax_status: None,
            credit_card: None,
            consent_vax: false,
            consent_data: true,
        }
    }
}

impl RegisterRequest {
    /// 记录疫苗信息同意弹窗的结果；拒绝时清除疫苗状态
    pub fn set_vax_consent(&mut self, accepted: bool) {
        self.consent_vax = accepted;
        if !accepted {
            self.vax_status = Some(false);
        }
    }

    /// 提交前整理：未同意时不发送疫苗状态，空字符串视为未填写
    pub fn normalized(mut self) -> Self {
        if !self.consent_vax {
            self.vax_status = None;
        }
        for field in [&mut self.mobile, &mut self.citizenship, &mut self.trade, &mut self.credit_card] {
            if field.as_deref().map(str::trim).map_or(false, str::is_empty) {
                *field = None;
            }
        }
        self
    }
}

/// 登录/注册成功后的响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub user: User,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VerifyEmailRequest {
    #[validate(length(min = 1))]
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_validation() {
        let ok = LoginRequest {
            email: "client@example.com".to_string(),
            password: "secret".to_string(),
        };
        assert!(ok.validate().is_ok());

        let bad = LoginRequest {
            email: "not-an-email".to_string(),
            password: String::new(),
        };
        let errors = bad.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
        assert!(errors.field_errors().contains_key("password"));
    }

    #[test]
    fn test_register_normalization_drops_vax_without_consent() {
        let req = RegisterRequest {
            email: "a@b.com".to_string(),
            name: "Ana".to_string(),
            password: "hunter22".to_string(),
            vax_status: Some(true),
            mobile: Some("  ".to_string()),
            ..Default::default()
        }
        .normalized();

        assert_eq!(req.vax_status, None);
        assert_eq!(req.mobile, None);
        assert_eq!(req.language, "English");
        assert!(req.consent_data);
    }

    #[test]
    fn test_vax_consent_toggle() {
        let mut req = RegisterRequest {
            vax_status: Some(true),
            ..Default::default()
        };
        req.set_vax_consent(true);
        assert_eq!(req.clone().normalized().vax_status, Some(true));

        req.set_vax_consent(false);
        assert_eq!(req.vax_status, Some(false));
        assert_eq!(req.normalized().vax_status, None);
    }

    #[test]
    fn test_user_role_deserialization() {
        let user: User = serde_json::from_value(serde_json::json!({
            "id": "u-1",
            "email": "admin@example.com",
            "name": "Admin",
            "role": "admin",
            "created_at": "2024-01-01T00:00:00+00:00"
        }))
        .unwrap();
        assert!(user.is_admin());
        assert!(!user.email_verified);
    }
}
