pub mod config;
pub mod credentials;
pub mod paths;

pub use config::{ApiConfig, Config, DisplayConfig};
pub use credentials::{CredentialStore, Session};
pub use paths::{PathManager, container_base_path};
