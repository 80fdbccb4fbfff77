//! `SplitGGORequest` handler.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::address::{check_owner, Family};
use crate::context::Ctx;
use crate::error::{DomainError, DomainResult};
use crate::handler::framework::{fetch_typed, ValidatedRequest};
use crate::model::{Ggo, GgoAction, GgoNext};

pub const FAMILY_NAME: &str = "SplitGGORequest";

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SplitPart {
    pub address: String,
    pub amount: u64,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SplitGgoRequest {
    pub origin: String,
    pub parts: Vec<SplitPart>,
}

impl ValidatedRequest for SplitGgoRequest {
    fn validate(&self) -> Result<(), String> {
        if self.origin.is_empty() {
            return Err("origin address is required.".to_string());
        }
        if self.parts.len() < 2 {
            return Err("a split requires at least two parts.".to_string());
        }
        Ok(())
    }
}

pub fn apply(ctx: &mut Ctx, signer_public_key_hex: &str, payload: &[u8]) -> DomainResult<()> {
    let request: SplitGgoRequest = crate::handler::framework::decode_payload(payload)?;

    let current: Ggo = fetch_typed(ctx, &request.origin)?;

    if current.is_consumed() {
        return Err(DomainError::invalid("GGO already has been used"));
    }

    if !check_owner(&request.origin, Family::Ggo, signer_public_key_hex) {
        return Err(DomainError::invalid("Invalid key for GGO"));
    }

    let destination_addresses: Vec<String> =
        request.parts.iter().map(|p| p.address.clone()).collect();
    if crate::handler::framework::addresses_not_empty(ctx, &destination_addresses)? {
        return Err(DomainError::invalid("Destination address not empty"));
    }

    let parts_sum: u64 = request.parts.iter().map(|p| p.amount).sum();
    if parts_sum != current.amount {
        return Err(DomainError::invalid(
            "The sum of the parts does not equal the whole",
        ));
    }

    let mut updates = BTreeMap::new();
    for part in &request.parts {
        let child = current.child(request.origin.clone(), part.amount);
        let bytes = serde_json::to_vec(&child)
            .map_err(|e| DomainError::internal(format!("failed to encode child ggo: {e}")))?;
        updates.insert(part.address.clone(), bytes);
    }

    let mut parent = current;
    parent.next = Some(GgoNext {
        action: GgoAction::Split,
        addresses: destination_addresses,
    });
    let parent_bytes = serde_json::to_vec(&parent)
        .map_err(|e| DomainError::internal(format!("failed to encode parent ggo: {e}")))?;
    updates.insert(request.origin, parent_bytes);

    ctx.write(updates)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_single_part() {
        let request = SplitGgoRequest {
            origin: "origin".to_string(),
            parts: vec![SplitPart {
                address: "a".to_string(),
                amount: 10,
            }],
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn accepts_two_or_more_parts() {
        let request = SplitGgoRequest {
            origin: "origin".to_string(),
            parts: vec![
                SplitPart {
                    address: "a".to_string(),
                    amount: 10,
                },
                SplitPart {
                    address: "b".to_string(),
                    amount: 20,
                },
            ],
        };
        assert!(request.validate().is_ok());
    }
}
