//! `RetireGGORequest` handler.
//!
//! This handler never creates or mutates the `Settlement` record — binding
//! is completed by [`crate::handler::settlement`]. The two-phase design lets
//! many retire transactions accumulate against the same settlement address
//! without multi-address write contention on that address.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::address::{check_owner, Family};
use crate::context::Ctx;
use crate::error::{DomainError, DomainResult};
use crate::handler::framework::{fetch_typed, ValidatedRequest};
use crate::model::{Ggo, GgoAction, GgoNext};

pub const FAMILY_NAME: &str = "RetireGGORequest";

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct RetireGgoRequest {
    pub origin: String,
    pub settlement_address: String,
}

impl ValidatedRequest for RetireGgoRequest {
    fn validate(&self) -> Result<(), String> {
        if self.origin.is_empty() || self.settlement_address.is_empty() {
            return Err("origin and settlement_address are required.".to_string());
        }
        Ok(())
    }
}

pub fn apply(ctx: &mut Ctx, signer_public_key_hex: &str, payload: &[u8]) -> DomainResult<()> {
    let request: RetireGgoRequest = crate::handler::framework::decode_payload(payload)?;

    let mut ggo: Ggo = fetch_typed(ctx, &request.origin)?;

    if ggo.is_consumed() {
        return Err(DomainError::invalid("GGO already has been used"));
    }

    if !check_owner(&request.origin, Family::Ggo, signer_public_key_hex) {
        return Err(DomainError::invalid("Invalid key for GGO"));
    }

    ggo.next = Some(GgoNext {
        action: GgoAction::Retire,
        addresses: vec![request.settlement_address],
    });

    let bytes = serde_json::to_vec(&ggo)
        .map_err(|e| DomainError::internal(format!("failed to encode ggo: {e}")))?;
    let mut updates = BTreeMap::new();
    updates.insert(request.origin, bytes);
    ctx.write(updates)
}
