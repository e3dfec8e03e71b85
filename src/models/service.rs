use serde::{Deserialize, Serialize};

use crate::utils::serde_helpers::null_as_default;

/// 服务目录中的一项
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub service_type: String,
    #[serde(default = "default_true")]
    pub is_online: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub photos: Vec<String>,
    pub provider_id: Option<String>,
    pub created_at: String,
}

fn default_true() -> bool {
    true
}

impl Service {
    pub fn display_price(&self) -> String {
        format!("${:.2}", self.price)
    }

    pub fn delivery_label(&self) -> &'static str {
        if self.is_online {
            "Online"
        } else {
            "In-Person"
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RestrictionLevel {
    Low,
    Medium,
    High,
}

/// 当前防疫限制（由后端计算）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CovidRestrictions {
    pub level: RestrictionLevel,
    pub density_limits: String,
    pub mask_required: bool,
    pub quarantine_required: bool,
    pub last_updated: String,
    pub message: String,
}

impl CovidRestrictions {
    /// 中高级别限制下优先推荐线上服务
    pub fn prefers_remote(&self) -> bool {
        matches!(self.level, RestrictionLevel::Medium | RestrictionLevel::High)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceSuggestions {
    #[serde(default)]
    pub suggestions: Vec<String>,
    pub restrictions: Option<CovidRestrictions>,
}
