pub mod api;
pub mod catalog;
pub mod dashboard;
pub mod notification;
pub mod session;
pub mod verification;

// 重新导出常用类型
pub use api::ApiClient;
pub use catalog::Catalog;
pub use dashboard::Dashboard;
pub use notification::{NotificationApi, NotificationCenter, PollerHandle};
pub use session::SessionStore;
pub use verification::{verify_email, EmailVerification, VerificationStatus};
