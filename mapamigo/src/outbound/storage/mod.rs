//! Key-value store adapters.
//!
//! Both adapters persist the same flat string documents; services can swap
//! between them without behavioural drift.

mod file;
mod memory;

pub use file::FileKeyValueStore;
pub use memory::MemoryKeyValueStore;
