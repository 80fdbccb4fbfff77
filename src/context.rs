//! Thin wrapper around `sawtooth_sdk`'s read/write state interface.
//!
//! Handlers never call `TransactionContext` directly; they go through
//! `Ctx`, which collapses the SDK's `(String, Vec<u8>)` tuple-based API into
//! a `BTreeMap` keyed by address and maps `ContextError` into
//! [`DomainError::Internal`]. There is no rollback API because handlers
//! never write before every read has completed.

use std::collections::BTreeMap;

use sawtooth_sdk::processor::handler::TransactionContext;

use crate::error::{DomainError, DomainResult};

pub struct Ctx<'a> {
    inner: &'a mut dyn TransactionContext,
}

impl<'a> Ctx<'a> {
    pub fn new(inner: &'a mut dyn TransactionContext) -> Self {
        Self { inner }
    }

    /// Read the given addresses, returning only the ones present in state.
    pub fn read(&self, addresses: &[String]) -> DomainResult<BTreeMap<String, Vec<u8>>> {
        let entries = self
            .inner
            .get_state_entries(addresses)
            .map_err(DomainError::from)?;
        Ok(entries.into_iter().collect())
    }

    pub fn read_one(&self, address: &str) -> DomainResult<Option<Vec<u8>>> {
        Ok(self.read(&[address.to_string()])?.remove(address))
    }

    /// Atomically commit every (address, bytes) pair. Callers must collect
    /// all of a handler's effects before calling this once.
    pub fn write(&mut self, updates: BTreeMap<String, Vec<u8>>) -> DomainResult<()> {
        self.inner
            .set_state_entries(updates.into_iter().collect())
            .map_err(DomainError::from)
    }
}
