//! Guards shared by all six handlers: payload decoding, typed state fetch,
//! and address-occupancy checks.

use serde::de::DeserializeOwned;

use crate::context::Ctx;
use crate::error::{DomainError, DomainResult};
use crate::model::{Ggo, Measurement, Settlement};

fn invalid_json_error() -> DomainError {
    DomainError::invalid("The transaction payload was an invalid request. Invalid JSON.")
}

/// A request payload that can validate its own schema rules (non-negative
/// amounts, hourly interval, sector allow-list, `begin < end`, ...) after
/// JSON decoding succeeds.
pub trait ValidatedRequest: DeserializeOwned {
    /// Returns the schema's error message on a structural failure.
    fn validate(&self) -> Result<(), String>;
}

/// UTF-8 decode → JSON parse → schema-validate → typed request.
pub fn decode_payload<T: ValidatedRequest>(payload: &[u8]) -> DomainResult<T> {
    let text = std::str::from_utf8(payload).map_err(|_| invalid_json_error())?;
    let request: T = serde_json::from_str(text).map_err(|_| invalid_json_error())?;
    request.validate().map_err(DomainError::invalid)?;
    Ok(request)
}

/// An entity that can be fetched out of state by the generic helpers below.
pub trait StateEntity: DeserializeOwned {
    const KIND: &'static str;
}

impl StateEntity for Measurement {
    const KIND: &'static str = "Measurement";
}

impl StateEntity for Ggo {
    const KIND: &'static str = "GGO";
}

impl StateEntity for Settlement {
    const KIND: &'static str = "Settlement";
}

fn not_a_valid_entity_error<T: StateEntity>(address: &str) -> DomainError {
    DomainError::invalid(format!(
        "Address \"{address}\" does not contain a valid {}.",
        T::KIND
    ))
}

/// Fetch and decode a required entity. Absence or malformed state both raise
/// the same uniform error.
pub fn fetch_typed<T: StateEntity>(ctx: &Ctx, address: &str) -> DomainResult<T> {
    let bytes = ctx
        .read_one(address)?
        .ok_or_else(|| not_a_valid_entity_error::<T>(address))?;
    serde_json::from_slice(&bytes).map_err(|_| not_a_valid_entity_error::<T>(address))
}

/// Like [`fetch_typed`], but returns `None` on absence or malformed state
/// instead of failing.
pub fn try_fetch_typed<T: StateEntity>(ctx: &Ctx, address: &str) -> DomainResult<Option<T>> {
    match ctx.read_one(address)? {
        None => Ok(None),
        Some(bytes) => Ok(serde_json::from_slice(&bytes).ok()),
    }
}

/// True if any of `addresses` already holds state.
pub fn addresses_not_empty(ctx: &Ctx, addresses: &[String]) -> DomainResult<bool> {
    Ok(!ctx.read(addresses)?.is_empty())
}
