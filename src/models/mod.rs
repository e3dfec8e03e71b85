pub mod booking;
pub mod notification;
pub mod response;
pub mod service;
pub mod user;

// 重新导出常用类型
pub use booking::{Booking, BookingForm, BookingStatus, CreateBookingRequest};
pub use notification::{Notification, NotificationFeed, NotificationKind, NotificationView, Timestamp};
pub use response::{ErrorResponse, MessageResponse};
pub use service::{CovidRestrictions, Service, ServiceSuggestions};
pub use user::{LoginRequest, RegisterRequest, TokenResponse, User, UserRole};
