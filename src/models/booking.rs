use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::models::service::Service;

pub const DEFAULT_BOOKING_DURATION: u32 = 60;
pub const MIN_BOOKING_DURATION: u32 = 30;
/// 时长按 15 分钟递增
pub const BOOKING_DURATION_STEP: u32 = 15;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    pub user_email: String,
    pub service_id: String,
    pub service_type: String,
    pub preferred_date: String,
    pub duration: u32,
    pub details: Option<String>,
    pub status: BookingStatus,
    pub created_at: String,
    pub covid_restrictions: String,
    pub cost: f64,
}

impl Booking {
    /// 只有已接受的预约才有二维码
    pub fn has_qr_code(&self) -> bool {
        self.status == BookingStatus::Accepted
    }

    pub fn qr_file_name(&self) -> String {
        qr_file_name(&self.id)
    }
}

pub fn qr_file_name(booking_id: &str) -> String {
    format!("booking-{}-qr.png", booking_id)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Accepted,
    Declined,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusColor {
    Green,
    Red,
    Yellow,
}

impl BookingStatus {
    pub fn color(self) -> StatusColor {
        match self {
            BookingStatus::Accepted => StatusColor::Green,
            BookingStatus::Declined => StatusColor::Red,
            BookingStatus::Pending => StatusColor::Yellow,
        }
    }
}

/// 预约对话框中的表单
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BookingForm {
    #[validate(length(min = 1, message = "Preferred date is required"))]
    pub preferred_date: String,

    #[validate(range(min = 30, message = "Duration must be at least 30 minutes"))]
    pub duration: u32,

    #[validate(length(max = 2000))]
    pub details: Option<String>,
}

impl BookingForm {
    /// 派生规则之外再检查时长步进
    pub fn check(&self) -> Result<(), ValidationErrors> {
        let mut errors = match self.validate() {
            Ok(()) => ValidationErrors::new(),
            Err(errors) => errors,
        };
        if self.duration % BOOKING_DURATION_STEP != 0 {
            let mut error = ValidationError::new("step");
            error.message = Some("Duration must be a multiple of 15 minutes".into());
            errors.add("duration", error);
        }

        if errors.errors().is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl Default for BookingForm {
    fn default() -> Self {
        Self {
            preferred_date: String::new(),
            duration: DEFAULT_BOOKING_DURATION,
            details: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBookingRequest {
    pub service_id: String,
    pub service_type: String,
    pub preferred_date: String,
    pub duration: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl CreateBookingRequest {
    /// 服务类型沿用服务名称
    pub fn for_service(service: &Service, form: BookingForm) -> Self {
        Self {
            service_id: service.id.clone(),
            service_type: service.name.clone(),
            preferred_date: form.preferred_date,
            duration: form.duration,
            details: form.details.filter(|d| !d.trim().is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> Service {
        Service {
            id: "s-1".to_string(),
            name: "Online Renovation Consultation".to_string(),
            description: "Plan your renovation".to_string(),
            price: 80.0,
            service_type: "consultation".to_string(),
            is_online: true,
            photos: vec![],
            provider_id: None,
            created_at: "2024-01-01T00:00:00+00:00".to_string(),
        }
    }

    #[test]
    fn test_booking_form_validation() {
        let form = BookingForm::default();
        assert_eq!(form.duration, 60);
        assert!(form.validate().is_err());

        let form = BookingForm {
            preferred_date: "2024-05-01T10:00".to_string(),
            ..Default::default()
        };
        assert!(form.validate().is_ok());

        let form = BookingForm {
            preferred_date: "2024-05-01T10:00".to_string(),
            duration: 5,
            details: None,
        };
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_booking_duration_steps() {
        let with_duration = |duration| BookingForm {
            preferred_date: "2024-05-01".to_string(),
            duration,
            details: None,
        };

        assert!(with_duration(30).check().is_ok());
        assert!(with_duration(45).check().is_ok());
        // 没有上限
        assert!(with_duration(510).check().is_ok());

        assert!(with_duration(15).check().is_err());
        let errors = with_duration(50).check().unwrap_err();
        assert!(errors.field_errors().contains_key("duration"));
        assert!(with_duration(20).check().is_err());
    }

    #[test]
    fn test_create_request_uses_service_name_as_type() {
        let form = BookingForm {
            preferred_date: "2024-05-01T10:00".to_string(),
            duration: 90,
            details: Some("   ".to_string()),
        };
        let req = CreateBookingRequest::for_service(&service(), form);
        assert_eq!(req.service_id, "s-1");
        assert_eq!(req.service_type, "Online Renovation Consultation");
        assert_eq!(req.duration, 90);
        assert!(req.details.is_none());

        let body = serde_json::to_value(&req).unwrap();
        assert!(body.get("details").is_none());
    }

    #[test]
    fn test_status_color() {
        assert_eq!(BookingStatus::Accepted.color(), StatusColor::Green);
        assert_eq!(BookingStatus::Declined.color(), StatusColor::Red);
        assert_eq!(BookingStatus::Pending.color(), StatusColor::Yellow);
        assert_eq!(qr_file_name("b-9"), "booking-b-9-qr.png");
    }
}
