/// Database configuration and connection management
pub mod database;

/// Environment-driven runtime settings (bind address, config path)
pub mod server;

/// Seed data and billing rates loaded from config.toml
pub mod subdivision;
