use chrono::{DateTime, Local, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::utils::serde_helpers::{null_as_default, opaque_id};

/// 超过该值时徽标显示为 "9+"
pub const BADGE_OVERFLOW: u64 = 9;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    #[serde(with = "opaque_id")]
    pub id: String,
    pub title: String,
    pub message: String,
    #[serde(rename = "type", default)]
    pub kind: NotificationKind,
    #[serde(default)]
    pub read: bool,
    #[serde(default)]
    pub created_at: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking_id: Option<String>,
}

impl Notification {
    pub fn is_unread(&self) -> bool {
        !self.read
    }

    /// 本地时区的展示时间
    pub fn display_timestamp(&self) -> String {
        self.created_at.display()
    }
}

/// 通知时间，只用于展示
///
/// 无法解析的值原样保留，单条数据异常不影响整个列表。
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Timestamp {
    At(DateTime<Utc>),
    Raw(String),
}

impl Timestamp {
    pub fn parse(raw: &str) -> Self {
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Timestamp::At(dt.with_timezone(&Utc));
        }
        // 不带时区的时间按 UTC 处理
        match NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
            Ok(naive) => Timestamp::At(DateTime::from_naive_utc_and_offset(naive, Utc)),
            Err(_) => Timestamp::Raw(raw.to_string()),
        }
    }

    pub fn as_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            Timestamp::At(dt) => Some(*dt),
            Timestamp::Raw(_) => None,
        }
    }

    pub fn display(&self) -> String {
        match self {
            Timestamp::At(dt) => dt
                .with_timezone(&Local)
                .format("%-m/%-d/%Y, %-I:%M:%S %p")
                .to_string(),
            Timestamp::Raw(raw) => raw.clone(),
        }
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Timestamp::Raw(String::new())
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Timestamp::At(dt)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(raw) => Timestamp::parse(&raw),
            Value::Null => Timestamp::default(),
            other => Timestamp::Raw(other.to_string()),
        })
    }
}

/// 通知类型，只影响展示样式；未知类型按 Info 处理
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Warning,
    Error,
    #[default]
    #[serde(other)]
    Info,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accent {
    Green,
    Yellow,
    Red,
    Blue,
}

impl NotificationKind {
    pub fn accent(self) -> Accent {
        match self {
            NotificationKind::Success => Accent::Green,
            NotificationKind::Warning => Accent::Yellow,
            NotificationKind::Error => Accent::Red,
            NotificationKind::Info => Accent::Blue,
        }
    }
}

/// `GET /notifications` 的响应体
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NotificationFeed {
    #[serde(default, deserialize_with = "null_as_default")]
    pub notifications: Vec<Notification>,
    #[serde(default)]
    pub unread_count: u64,
}

/// 通知组件的本地视图状态
///
/// `unread_count` 始终是服务端最近一次返回的值，不在本地重新统计。
/// 列表可能被服务端截断，两者不保证一致。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotificationView {
    pub notifications: Vec<Notification>,
    pub unread_count: u64,
    pub panel_open: bool,
}

impl NotificationView {
    /// 用服务端响应整体替换，保留面板开关状态
    pub fn apply(&mut self, feed: NotificationFeed) {
        self.notifications = feed.notifications;
        self.unread_count = feed.unread_count;
    }

    pub fn badge_label(&self) -> Option<String> {
        badge_label(self.unread_count)
    }

    /// "全部标为已读" 按钮是否可见
    pub fn can_mark_all(&self) -> bool {
        self.unread_count > 0
    }

    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&Notification> {
        self.notifications.iter().find(|n| n.id == id)
    }
}

pub fn badge_label(unread_count: u64) -> Option<String> {
    match unread_count {
        0 => None,
        n if n > BADGE_OVERFLOW => Some(format!("{}+", BADGE_OVERFLOW)),
        n => Some(n.to_string()),
    }
}
