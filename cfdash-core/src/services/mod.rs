//! 业务逻辑服务层

mod settings_service;
mod view_model;

pub use settings_service::{SettingsService, normalize_credentials};
pub use view_model::DomainViewModel;
