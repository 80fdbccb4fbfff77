//! `IssueGGORequest` handler.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::context::Ctx;
use crate::error::{DomainError, DomainResult};
use crate::handler::framework::{addresses_not_empty, fetch_typed, ValidatedRequest};
use crate::model::{EmissionValue, Ggo, Measurement, MeasurementType};
use crate::policy::Policy;

pub const FAMILY_NAME: &str = "IssueGGORequest";

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct IssueGgoRequest {
    pub origin: String,
    pub destination: String,
    pub tech_type: String,
    pub fuel_type: String,
    #[serde(default)]
    pub emissions: BTreeMap<String, EmissionValue>,
}

impl ValidatedRequest for IssueGgoRequest {
    fn validate(&self) -> Result<(), String> {
        if self.origin.is_empty() || self.destination.is_empty() {
            return Err("origin and destination addresses are required.".to_string());
        }
        Ok(())
    }
}

pub fn apply(
    ctx: &mut Ctx,
    signer_public_key_hex: &str,
    payload: &[u8],
    policy: &Policy,
) -> DomainResult<()> {
    let request: IssueGgoRequest = crate::handler::framework::decode_payload(payload)?;

    if !policy.allows_issuer(signer_public_key_hex) {
        return Err(DomainError::invalid(
            "Signer is not an authorized GGO issuer.",
        ));
    }

    let measurement: Measurement = fetch_typed(ctx, &request.origin)?;

    if addresses_not_empty(ctx, &[request.destination.clone()])? {
        return Err(DomainError::invalid("GGO already issued!"));
    }

    if measurement.kind != MeasurementType::Production {
        return Err(DomainError::invalid(
            "Measurement is not of type Production!",
        ));
    }

    let ggo = Ggo {
        origin: request.origin,
        amount: measurement.amount,
        begin: measurement.begin,
        end: measurement.end,
        sector: measurement.sector,
        tech_type: request.tech_type,
        fuel_type: request.fuel_type,
        emissions: request.emissions,
        next: None,
    };
    let bytes = serde_json::to_vec(&ggo)
        .map_err(|e| DomainError::internal(format!("failed to encode ggo: {e}")))?;

    let mut updates = BTreeMap::new();
    updates.insert(request.destination, bytes);
    ctx.write(updates)
}
