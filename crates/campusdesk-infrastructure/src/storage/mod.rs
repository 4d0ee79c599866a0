pub mod config_storage;
pub mod json_store;
pub mod memory_store;
pub mod secret_storage;

pub use config_storage::ConfigStorage;
pub use json_store::JsonFileStore;
pub use memory_store::MemoryStore;
pub use secret_storage::{API_KEY_ENV, SecretStorage, SecretStorageError};
