use crate::{
    error::Result,
    models::notification::{NotificationFeed, NotificationView},
};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Duration;
use tokio::{
    task::{JoinHandle, JoinSet},
    time::{interval, MissedTickBehavior},
};
use tracing::{debug, error, info};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// 通知相关的三个后端接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationApi: Send + Sync {
    /// `GET /notifications`
    async fn fetch_notifications(&self) -> Result<NotificationFeed>;

    /// `PUT /notifications/{id}/read`
    async fn mark_read(&self, notification_id: &str) -> Result<()>;

    /// `PUT /notifications/read-all`
    async fn mark_all_read(&self) -> Result<()>;
}

/// 通知铃铛组件
///
/// 本地视图是服务端状态的镜像：每次刷新整体替换，变更操作之后一定重新拉取。
/// 所有请求失败都只记录日志，保留旧状态，不向调用方返回错误。
///
/// 并发刷新之间没有序号保护，最后返回的响应覆盖视图（不一定是最后发出的请求）。
#[derive(Clone)]
pub struct NotificationCenter {
    api: Arc<dyn NotificationApi>,
    view: Arc<RwLock<NotificationView>>,
    poll_interval: Duration,
}

impl NotificationCenter {
    pub fn new(api: Arc<dyn NotificationApi>) -> Self {
        Self::with_interval(api, DEFAULT_POLL_INTERVAL)
    }

    /// 间隔为零时退回默认的 30 秒
    pub fn with_interval(api: Arc<dyn NotificationApi>, poll_interval: Duration) -> Self {
        let poll_interval = if poll_interval.is_zero() {
            DEFAULT_POLL_INTERVAL
        } else {
            poll_interval
        };

        Self {
            api,
            view: Arc::new(RwLock::new(NotificationView::default())),
            poll_interval,
        }
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    pub fn view(&self) -> NotificationView {
        self.view.read().clone()
    }

    pub fn unread_count(&self) -> u64 {
        self.view.read().unread_count
    }

    pub fn badge_label(&self) -> Option<String> {
        self.view.read().badge_label()
    }

    pub fn is_panel_open(&self) -> bool {
        self.view.read().panel_open
    }

    pub fn set_panel_open(&self, open: bool) {
        self.view.write().panel_open = open;
    }

    pub fn toggle_panel(&self) -> bool {
        let mut view = self.view.write();
        view.panel_open = !view.panel_open;
        view.panel_open
    }

    pub async fn refresh(&self) {
        match self.api.fetch_notifications().await {
            Ok(feed) => {
                debug!(
                    "Fetched {} notifications, {} unread",
                    feed.notifications.len(),
                    feed.unread_count
                );
                self.view.write().apply(feed);
            }
            Err(e) => {
                error!("Failed to fetch notifications: {}", e);
            }
        }
    }

    pub async fn mark_read(&self, notification_id: &str) {
        match self.api.mark_read(notification_id).await {
            Ok(()) => self.refresh().await,
            Err(e) => error!("Failed to mark notification {} as read: {}", notification_id, e),
        }
    }

    pub async fn mark_all_read(&self) {
        match self.api.mark_all_read().await {
            Ok(()) => self.refresh().await,
            Err(e) => error!("Failed to mark all notifications as read: {}", e),
        }
    }

    /// 点击一条通知：已读（或本地不存在）的不发请求
    pub async fn select(&self, notification_id: &str) {
        let unread = self
            .view
            .read()
            .find(notification_id)
            .map_or(false, |n| n.is_unread());

        if unread {
            self.mark_read(notification_id).await;
        }
    }

    /// 挂载：立即刷新一次，之后按固定间隔刷新，直到返回的句柄被释放
    pub fn mount(&self) -> PollerHandle {
        let center = self.clone();
        let task = tokio::spawn(async move { center.poll().await });
        info!("Notification polling started (every {:?})", self.poll_interval);
        PollerHandle { task: Some(task) }
    }

    async fn poll(self) {
        let mut ticker = interval(self.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        // 每个 tick 独立刷新，慢响应不会阻塞下一次 tick
        let mut in_flight = JoinSet::new();
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let center = self.clone();
                    in_flight.spawn(async move { center.refresh().await });
                }
                Some(_) = in_flight.join_next(), if !in_flight.is_empty() => {}
            }
        }
    }
}

/// 轮询任务的生命周期句柄
///
/// 释放时取消定时器以及由定时器发起、尚未完成的刷新。
#[derive(Debug)]
pub struct PollerHandle {
    task: Option<JoinHandle<()>>,
}

impl PollerHandle {
    pub fn unmount(mut self) {
        self.stop();
    }

    pub fn is_mounted(&self) -> bool {
        self.task.as_ref().map_or(false, |t| !t.is_finished())
    }

    fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            info!("Notification polling stopped");
        }
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.stop();
    }
}
