//! Persistence Layer - 数据持久化
//!
//! 快照存储有三种实现（file / sled / memory），产物固定存放在文件系统

pub mod file;
pub mod memory;
pub mod sled;

pub use self::file::{FileArtifactStore, FileProjectStore};
pub use self::memory::InMemoryProjectStore;
pub use self::sled::SledProjectStore;
