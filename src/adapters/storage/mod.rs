//! Storage Adapters
//!
//! Implementations of the KeyValueStore port.
//!
//! ## Available Adapters
//!
//! - **FileKeyValueStore** - One file per key on disk
//! - **InMemoryKeyValueStore** - Shared in-memory map (testing/development)
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{FileKeyValueStore, InMemoryKeyValueStore};
//!
//! // Production: file-based storage
//! let store = FileKeyValueStore::new("./data/spirit-guide");
//!
//! // Testing: in-memory storage
//! let store = InMemoryKeyValueStore::new();
//! ```

mod file_store;
mod in_memory_store;

pub use file_store::FileKeyValueStore;
pub use in_memory_store::InMemoryKeyValueStore;
