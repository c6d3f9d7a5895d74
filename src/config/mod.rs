// ==========================================
// EventFab Element Import - Configuration Layer
// ==========================================
// Responsibility: system configuration management.
// Storage: config_kv table
// ==========================================

pub mod config_manager;
pub mod import_config_trait;

// Re-export core configuration types
pub use config_manager::{config_keys, ConfigManager};
pub use import_config_trait::ImportConfigReader;
