use crate::{
    config::Config,
    error::Result,
    services::{
        api::ApiClient,
        catalog::Catalog,
        dashboard::Dashboard,
        notification::NotificationCenter,
        session::SessionStore,
    },
};
use std::sync::Arc;

/// 应用程序的共享状态
/// 包含配置、会话以及各页面共用的API客户端
#[derive(Clone)]
pub struct AppState {
    /// 应用配置
    pub config: Config,

    /// 当前会话
    pub session: SessionStore,

    /// 后端API客户端
    pub api: ApiClient,

    /// 通知铃铛
    pub notifications: NotificationCenter,
}

impl AppState {
    pub fn new(config: Config, session: SessionStore) -> Result<Self> {
        let api = ApiClient::new(&config, session.clone())?;
        let notifications =
            NotificationCenter::with_interval(Arc::new(api.clone()), config.poll_interval());

        Ok(Self {
            config,
            session,
            api,
            notifications,
        })
    }

    pub fn dashboard(&self) -> Dashboard {
        Dashboard::new(self.api.clone())
    }

    pub fn catalog(&self) -> Catalog {
        Catalog::new(self.api.clone())
    }

    /// 检查是否为生产环境
    pub fn is_production(&self) -> bool {
        self.config.is_production()
    }

    /// 检查是否为开发环境
    pub fn is_development(&self) -> bool {
        self.config.is_development()
    }
}
