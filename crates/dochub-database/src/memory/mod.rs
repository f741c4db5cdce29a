//! Process-local store backend.
//!
//! Selected with `database.provider = "memory"`. Used by the test suites and
//! for running the server without PostgreSQL; nothing survives a restart.

pub mod store;

pub use store::MemoryStore;
