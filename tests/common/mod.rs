//! In-memory `TransactionContext` mock and fixture builders.

use std::cell::RefCell;
use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use sawtooth_sdk::processor::handler::{ContextError, TransactionContext};
use sha2::{Digest, Sha512};

use ggo_processor::address::{derive_address, Family};
use ggo_processor::context::Ctx;

/// A stand-in for the validator's real state store: everything lives in a
/// `BTreeMap` guarded by a `RefCell` so the mock can implement
/// `TransactionContext`'s `&self` methods while still mutating.
#[derive(Default)]
pub struct MockContext {
    state: RefCell<BTreeMap<String, Vec<u8>>>,
}

impl MockContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ctx(&mut self) -> Ctx<'_> {
        Ctx::new(self)
    }

    pub fn get_raw(&self, address: &str) -> Option<Vec<u8>> {
        self.state.borrow().get(address).cloned()
    }

    pub fn put_raw(&self, address: &str, bytes: Vec<u8>) {
        self.state.borrow_mut().insert(address.to_string(), bytes);
    }

    pub fn get_json<T: serde::de::DeserializeOwned>(&self, address: &str) -> Option<T> {
        self.get_raw(address)
            .map(|bytes| serde_json::from_slice(&bytes).expect("state entry is valid JSON"))
    }

    pub fn put_json<T: serde::Serialize>(&self, address: &str, value: &T) {
        let bytes = serde_json::to_vec(value).expect("value serializes");
        self.put_raw(address, bytes);
    }
}

impl TransactionContext for MockContext {
    fn get_state_entries(
        &self,
        addresses: &[String],
    ) -> Result<Vec<(String, Vec<u8>)>, ContextError> {
        let state = self.state.borrow();
        Ok(addresses
            .iter()
            .filter_map(|a| state.get(a).map(|bytes| (a.clone(), bytes.clone())))
            .collect())
    }

    fn set_state_entries(&self, entries: Vec<(String, Vec<u8>)>) -> Result<(), ContextError> {
        let mut state = self.state.borrow_mut();
        for (address, bytes) in entries {
            state.insert(address, bytes);
        }
        Ok(())
    }

    fn delete_state_entries(&self, addresses: &[String]) -> Result<Vec<String>, ContextError> {
        let mut state = self.state.borrow_mut();
        Ok(addresses
            .iter()
            .filter(|a| state.remove(*a).is_some())
            .cloned()
            .collect())
    }

    fn add_receipt_data(&self, _data: &[u8]) -> Result<(), ContextError> {
        Ok(())
    }

    fn add_event(
        &self,
        _event_type: String,
        _attributes: Vec<(String, String)>,
        _data: &[u8],
    ) -> Result<(), ContextError> {
        Ok(())
    }
}

/// A deterministic stand-in for a signing keypair, derived without depending
/// on a real HD-wallet scheme: `sha512(seed || index)` truncated to 32 bytes.
pub struct ChildKey {
    pub public_key_bytes: Vec<u8>,
    pub public_key_hex: String,
}

impl ChildKey {
    pub fn derive(seed: &str, index: u32) -> Self {
        let mut hasher = Sha512::new();
        hasher.update(seed.as_bytes());
        hasher.update(index.to_be_bytes());
        let digest = hasher.finalize();
        let public_key_bytes = digest[..32].to_vec();
        let public_key_hex = hex::encode(&public_key_bytes);
        Self {
            public_key_bytes,
            public_key_hex,
        }
    }

    pub fn address(&self, family: Family) -> String {
        derive_address(family, &self.public_key_bytes)
    }
}

pub fn master_seed() -> &'static str {
    "bfdgafgaertaehtaha43514r<aefag"
}

pub fn hour(begin: DateTime<Utc>) -> DateTime<Utc> {
    begin + chrono::Duration::hours(1)
}
