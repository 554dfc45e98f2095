pub mod document_store;
pub mod settings;

pub use document_store::{DocumentStore, InMemoryDocumentStore, StoredDocument};
pub use settings::{EnvSettingsProvider, MapSettingsProvider, SettingsProvider, TomlSettingsProvider};
