//! Core ledger logic for Sarraf.
//!
//! This crate contains the transfer ledger with ZERO web or database
//! dependencies. The PostgreSQL document store lives in the db crate and
//! plugs in through [`gateway::DocumentGateway`].
//!
//! # Modules
//!
//! - `gateway` - Key-value collection contract shared by both backends
//! - `storage` - Flat-file backend: one JSON array per collection
//! - `ledger` - Bank and hawala transfers: validation, lifecycle, views
//! - `reference` - Bank, market and account lookup lists

pub mod gateway;
pub mod ledger;
pub mod reference;
pub mod storage;
