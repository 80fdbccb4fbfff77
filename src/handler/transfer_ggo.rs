//! `TransferGGORequest` handler.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::address::{check_owner, Family};
use crate::context::Ctx;
use crate::error::{DomainError, DomainResult};
use crate::handler::framework::{addresses_not_empty, fetch_typed, ValidatedRequest};
use crate::model::{Ggo, GgoAction, GgoNext};

pub const FAMILY_NAME: &str = "TransferGGORequest";

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct TransferGgoRequest {
    pub origin: String,
    pub destination: String,
}

impl ValidatedRequest for TransferGgoRequest {
    fn validate(&self) -> Result<(), String> {
        if self.origin.is_empty() || self.destination.is_empty() {
            return Err("origin and destination addresses are required.".to_string());
        }
        Ok(())
    }
}

/// The destination GGO's implicit ownership is established purely by
/// convention: it must be addressed by the derived address of the intended
/// new owner's public key. This handler does not and cannot check that —
/// only a future transaction signed by that owner will succeed against it.
pub fn apply(ctx: &mut Ctx, signer_public_key_hex: &str, payload: &[u8]) -> DomainResult<()> {
    let request: TransferGgoRequest = crate::handler::framework::decode_payload(payload)?;

    let current: Ggo = fetch_typed(ctx, &request.origin)?;

    if current.is_consumed() {
        return Err(DomainError::invalid("GGO already has been used"));
    }

    if !check_owner(&request.origin, Family::Ggo, signer_public_key_hex) {
        return Err(DomainError::invalid("Invalid key for GGO"));
    }

    if addresses_not_empty(ctx, &[request.destination.clone()])? {
        return Err(DomainError::invalid("Destination address not empty"));
    }

    let child = current.child(request.origin.clone(), current.amount);

    let mut parent = current;
    parent.next = Some(GgoNext {
        action: GgoAction::Transfer,
        addresses: vec![request.destination.clone()],
    });

    let mut updates = BTreeMap::new();
    let parent_bytes = serde_json::to_vec(&parent)
        .map_err(|e| DomainError::internal(format!("failed to encode parent ggo: {e}")))?;
    let child_bytes = serde_json::to_vec(&child)
        .map_err(|e| DomainError::internal(format!("failed to encode child ggo: {e}")))?;
    updates.insert(request.origin, parent_bytes);
    updates.insert(request.destination, child_bytes);

    ctx.write(updates)
}
