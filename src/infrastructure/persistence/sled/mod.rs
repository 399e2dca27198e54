//! Sled Persistence

mod project_store;

pub use project_store::SledProjectStore;
