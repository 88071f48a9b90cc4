/// Application settings loaded from config.toml
pub mod app;

/// Database connection and table creation
pub mod database;

/// Start-up seeding of accounts and sessions
pub mod seed;

pub use app::{AppConfig, ServerConfig, SessionConfig, UserSeed, load_config, load_default_config};
