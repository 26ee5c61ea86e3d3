pub mod api;
pub mod config;
pub mod loader;
pub mod metrics_server;
pub mod observability;
pub mod profile;

pub use api::AppState;
pub use profile::Profile;
