//! `SettlementRequest` handler.
//!
//! A settlement accumulates over many transactions: the first one bound to a
//! consumption measurement creates the record, later ones append further
//! retired GGOs to it. Every append re-validates the full set of global
//! invariants (sector/time match, no double counting, no over-retirement)
//! against the record as it stands right now, not just the newly added parts.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::address::{check_owner, tail, Family};
use crate::context::Ctx;
use crate::error::{DomainError, DomainResult};
use crate::handler::framework::{fetch_typed, try_fetch_typed, ValidatedRequest};
use crate::model::{Ggo, GgoAction, Measurement, MeasurementType, Settlement, SettlementPart};

pub const FAMILY_NAME: &str = "SettlementRequest";

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SettlementRequest {
    pub settlement_address: String,
    pub measurement_address: String,
    pub ggo_addresses: Vec<String>,
}

impl ValidatedRequest for SettlementRequest {
    fn validate(&self) -> Result<(), String> {
        if self.settlement_address.is_empty() || self.measurement_address.is_empty() {
            return Err("settlement_address and measurement_address are required.".to_string());
        }
        Ok(())
    }
}

pub fn apply(ctx: &mut Ctx, signer_public_key_hex: &str, payload: &[u8]) -> DomainResult<()> {
    let request: SettlementRequest = crate::handler::framework::decode_payload(payload)?;

    let measurement: Measurement = fetch_typed(ctx, &request.measurement_address)?;
    let existing: Option<Settlement> = try_fetch_typed(ctx, &request.settlement_address)?;

    let mut settlement = match existing {
        Some(settlement) => {
            if settlement.measurement != request.measurement_address {
                return Err(DomainError::invalid(
                    "Measurement does not equal settlement measurement",
                ));
            }
            if !check_owner(
                &request.settlement_address,
                Family::Settlement,
                signer_public_key_hex,
            ) {
                return Err(DomainError::invalid("Invalid key for settlement"));
            }
            settlement
        }
        None => {
            if tail(&request.measurement_address) != tail(&request.settlement_address) {
                return Err(DomainError::invalid(
                    "Not correct settlement address for measurement",
                ));
            }
            if measurement.kind != MeasurementType::Consumption {
                return Err(DomainError::invalid("Measurment is not of type consumption"));
            }
            if !check_owner(
                &request.measurement_address,
                Family::Measurement,
                signer_public_key_hex,
            ) {
                return Err(DomainError::invalid("Invalid key for measurement"));
            }
            Settlement {
                measurement: request.measurement_address.clone(),
                parts: Vec::new(),
            }
        }
    };

    for ggo_address in &request.ggo_addresses {
        let ggo: Ggo = fetch_typed(ctx, ggo_address)?;

        let retired_to_this_settlement = match &ggo.next {
            Some(next) => {
                next.action == GgoAction::Retire
                    && next.addresses.len() == 1
                    && next.addresses[0] == request.settlement_address
            }
            None => false,
        };
        if !retired_to_this_settlement {
            return Err(DomainError::invalid("Invalid retired GGO in settlement"));
        }

        if ggo.sector != measurement.sector {
            return Err(DomainError::invalid(
                "GGO not produced in same sector as measurement",
            ));
        }
        if ggo.begin != measurement.begin {
            return Err(DomainError::invalid(
                "GGO not produced at the same time as measurement",
            ));
        }
        if settlement.contains_ggo(ggo_address) {
            return Err(DomainError::invalid("GGO already part of settlement"));
        }

        settlement.parts.push(SettlementPart {
            ggo: ggo_address.clone(),
            amount: ggo.amount,
        });
    }

    if settlement.total_amount() > measurement.amount {
        return Err(DomainError::invalid(
            "Invalid to retire more that measurement amount",
        ));
    }

    let bytes = serde_json::to_vec(&settlement)
        .map_err(|e| DomainError::internal(format!("failed to encode settlement: {e}")))?;
    let mut updates = BTreeMap::new();
    updates.insert(request.settlement_address, bytes);
    ctx.write(updates)
}
