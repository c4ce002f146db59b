//! Storage - Backend Trait and Executors
//!
//! `TigerStyle`: One contract, two structurally different substrates.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    StorageBackend Trait                      │
//! └─────────────────────────────────────────────────────────────┘
//!          ↑                                  ↑
//!          │                                  │
//! ┌────────┴────────┐               ┌─────────┴─────────┐
//! │ NativeExecutor  │               │   FallbackStore   │
//! │ (embedded SQL)  │               │ (key-value rows)  │
//! └─────────────────┘               └─────────┬─────────┘
//!                                             │
//!                                   ┌─────────┴─────────┐
//!                                   │  KeyValueStore    │
//!                                   │ MemoryKv / FileKv │
//!                                   └───────────────────┘
//! ```
//!
//! Whichever executor is active, callers observe identical table, row, and
//! result semantics for every operation inside the supported condition
//! grammar.

mod backend;
mod error;
mod fallback;
mod kv;

#[cfg(feature = "native")]
mod native;

pub use backend::StorageBackend;
pub use error::{StorageError, StorageResult};
pub use fallback::FallbackStore;
pub use kv::{FileKv, KeyValueStore, MemoryKv};

#[cfg(feature = "native")]
pub use native::NativeExecutor;
