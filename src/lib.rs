//! Transaction-validation core for a ledger of Guarantees of Origin (GGOs).
//!
//! This crate implements six deterministic Sawtooth transaction handlers —
//! publish-measurement, issue-ggo, split-ggo, transfer-ggo, retire-ggo, and
//! settlement — plus the address codec and entity model they share. See
//! `SPEC_FULL.md` at the repository root for the full design.

pub mod address;
pub mod config;
pub mod context;
pub mod error;
pub mod handler;
pub mod logging;
pub mod model;
pub mod policy;
