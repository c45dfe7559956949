//! Artifact cache infrastructure module

mod fs_cache;

pub use fs_cache::FsCacheStore;
