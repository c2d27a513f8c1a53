//! cfdash Core Library
//!
//! View-model logic of the Cloudflare DNS dashboard:
//! - observable dashboard state (store + reducer + subscribe)
//! - the domain view-model driving zone and record screens
//! - credential persistence and the settings service
//!
//! Presentation is left to the frontend, which only needs to call the
//! view-model and watch the published state.

pub mod adapters;
pub mod dashboard;
pub mod error;
pub mod services;
pub mod store;
pub mod traits;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use adapters::JsonFileCredentialStore;
pub use dashboard::Dashboard;
pub use error::{CoreError, CoreResult};
pub use services::{DomainViewModel, SettingsService};
pub use store::{Action, DashboardState, Store};
pub use traits::{CredentialStore, InMemoryCredentialStore};
