//! Flat-file persistence backend built on Apache OpenDAL.
//!
//! Each collection is one JSON array stored under `<prefix><collection>.json`.
//! Every mutation reads the whole array, changes it and writes it back.
//!
//! # Concurrency
//!
//! There is no locking. Two writers that interleave their read-modify-write
//! cycles on the same collection race, and the later write wins.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      Apache OpenDAL                              │
//! │                   (Unified Storage API)                          │
//! ├─────────────────────────────────────────────────────────────────┤
//! │ op.read("banks.json")       │ op.write("banks.json", bytes)     │
//! └─────────────────────────────────────────────────────────────────┘
//!               local directory   │   in-memory (tests)
//! ```

mod config;
mod service;

pub use config::{StorageConfig, StorageProvider};
pub use service::FlatFileGateway;
