// Infrastructure layer modules
pub mod config;
pub mod logging;
pub mod object_store;

// Re-exports
pub use config::{S3Config, S3ConfigError, S3Settings};
pub use logging::init_logging;
pub use object_store::{ObjectStore, S3ObjectStore, StorageError};
