//! Storage layer
//!
//! ```text
//! BlobStore (redb | memory)
//!     └── Store           soft-failing handle, atomic WriteBatch commits
//!          └── Collection<T>   one JSON array per key
//!               └── repository/*  typed lookups per entity
//! ```

pub mod collection;
pub mod keys;
pub mod repository;
pub mod storage;
pub mod store;

pub use collection::Collection;
pub use storage::{BlobStore, MemoryStore, RedbStore, StorageError, StorageResult};
pub use store::{Store, WriteBatch};
