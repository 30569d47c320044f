pub mod catalog;
pub mod config;
pub mod logging;
pub mod outbox;
pub mod script;

pub use catalog::{CatalogError, PatternCatalog, PatternCatalogLoader, PatternRecord};
pub use config::{AppConfig, ConfigError};
pub use outbox::{JsonOutbox, OutboxEntry};
pub use script::{Operation, ScriptError, ScriptLine, parse_script, replay};
