pub mod resource;
pub mod serde_helpers;
pub mod validation;

pub use resource::Resource;
