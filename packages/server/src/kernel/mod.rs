//! Infrastructure shared by all domains: the dependency container, the
//! object-storage seam, and the in-process stream hub feeding SSE clients.

pub mod chat_hub;
pub mod deps;
pub mod storage;

pub use chat_hub::ChatHub;
pub use deps::ServerDeps;
pub use storage::{BaseStorageService, MemoryStorageService, StorageAdapter};
