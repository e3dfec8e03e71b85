use crate::{
    error::{ClientError, Result},
    models::user::{LoginRequest, RegisterRequest, TokenResponse, User, UserRole},
    services::api::ApiClient,
};
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, info, warn};
use validator::Validate;

/// 已登录的会话
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    /// 仅凭预签发 token 启动时，用户信息在 `restore` 之前为空
    pub user: Option<User>,
}

/// 当前用户的会话存储
///
/// 克隆共享同一份状态；页面只通过 `current_user` / `login` / `logout` 使用它。
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<Option<Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        let store = Self::new();
        store.set_token(token);
        store
    }

    /// 使用预签发的 token，用户信息需随后 `restore`
    pub fn set_token(&self, token: impl Into<String>) {
        self.set(Session {
            token: token.into(),
            user: None,
        });
    }

    fn set(&self, session: Session) {
        *self.inner.write() = Some(session);
    }

    fn accept(&self, response: TokenResponse) -> Result<User> {
        if !response.token_type.eq_ignore_ascii_case("bearer") {
            return Err(ClientError::Unauthorized(format!(
                "Unsupported token type: {}",
                response.token_type
            )));
        }

        let user = response.user;
        self.set(Session {
            token: response.access_token,
            user: Some(user.clone()),
        });
        Ok(user)
    }

    pub async fn login(&self, api: &ApiClient, credentials: LoginRequest) -> Result<User> {
        credentials.validate()?;

        let response = api.login(&credentials).await?;
        let user = self.accept(response)?;
        info!("Logged in as {} ({:?})", user.email, user.role);
        Ok(user)
    }

    pub async fn register(&self, api: &ApiClient, form: RegisterRequest) -> Result<User> {
        let form = form.normalized();
        form.validate()?;
        if !form.consent_data {
            return Err(ClientError::validation("Data processing consent is required"));
        }
        if form.role == UserRole::Provider && form.trade.is_none() {
            return Err(ClientError::validation("Trade/profession is required for providers"));
        }

        let response = api.register(&form).await?;
        let user = self.accept(response)?;
        info!("Registered new account {}", user.email);
        Ok(user)
    }

    /// 用已有 token 拉取用户信息；token 失效时清空会话
    pub async fn restore(&self, api: &ApiClient) -> Result<User> {
        let token = self
            .token()
            .ok_or_else(|| ClientError::unauthorized("No session token"))?;

        match api.me().await {
            Ok(user) => {
                self.set(Session {
                    token,
                    user: Some(user.clone()),
                });
                debug!("Session restored for {}", user.email);
                Ok(user)
            }
            Err(e) => {
                if e.is_unauthorized() {
                    warn!("Stored session token rejected, clearing session");
                    self.logout();
                }
                Err(e)
            }
        }
    }

    pub fn logout(&self) {
        if self.inner.write().take().is_some() {
            info!("Logged out");
        }
    }

    pub fn current_user(&self) -> Option<User> {
        self.inner.read().as_ref().and_then(|s| s.user.clone())
    }

    pub fn token(&self) -> Option<String> {
        self.inner.read().as_ref().map(|s| s.token.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.read().is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.current_user().map_or(false, |u| u.is_admin())
    }
}

static GLOBAL_SESSION: Lazy<RwLock<Option<SessionStore>>> = Lazy::new(|| RwLock::new(None));

/// 应用启动时初始化进程级会话
pub fn init() -> Result<SessionStore> {
    let mut global = GLOBAL_SESSION.write();
    if global.is_some() {
        return Err(ClientError::internal("Session store already initialised"));
    }
    let store = SessionStore::new();
    *global = Some(store.clone());
    Ok(store)
}

pub fn global() -> Result<SessionStore> {
    GLOBAL_SESSION
        .read()
        .clone()
        .ok_or_else(|| ClientError::internal("Session store not initialised"))
}

/// 登出并释放进程级会话
pub fn teardown() {
    if let Some(store) = GLOBAL_SESSION.write().take() {
        store.logout();
    }
}
