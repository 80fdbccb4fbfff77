//! `PublishMeasurementRequest` handler.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::address::{derive_address, Family};
use crate::context::Ctx;
use crate::error::{DomainError, DomainResult};
use crate::handler::framework::{addresses_not_empty, ValidatedRequest};
use crate::model::{sector_allowed, Measurement, MeasurementType, DEFAULT_SECTORS};
use crate::policy::Policy;

pub const FAMILY_NAME: &str = "PublishMeasurementRequest";

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct PublishMeasurementRequest {
    pub amount: u64,
    #[serde(rename = "type")]
    pub kind: MeasurementType,
    pub begin: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub sector: String,
}

impl ValidatedRequest for PublishMeasurementRequest {
    fn validate(&self) -> Result<(), String> {
        if self.begin >= self.end {
            return Err("begin must be strictly before end.".to_string());
        }
        if self.end - self.begin != chrono::Duration::hours(1) {
            return Err("end must equal begin plus exactly one hour.".to_string());
        }
        if !sector_allowed(&self.sector, DEFAULT_SECTORS) {
            return Err(format!("Unknown sector \"{}\".", self.sector));
        }
        Ok(())
    }
}

/// Apply a `PublishMeasurementRequest`. `declared_outputs` is the
/// transaction header's declared output address list; when non-empty it
/// must include the signer-derived measurement address, the same check
/// `Settlement` performs for a consumption measurement.
pub fn apply(
    ctx: &mut Ctx,
    signer_public_key_hex: &str,
    declared_outputs: &[String],
    payload: &[u8],
    policy: &Policy,
) -> DomainResult<()> {
    let request: PublishMeasurementRequest = crate::handler::framework::decode_payload(payload)?;

    if !policy.allows_publisher(signer_public_key_hex) {
        return Err(DomainError::invalid(
            "Signer is not an authorized measurement publisher.",
        ));
    }

    let signer_bytes = hex::decode(signer_public_key_hex)
        .map_err(|e| DomainError::internal(format!("invalid signer public key hex: {e}")))?;
    let address = derive_address(Family::Measurement, &signer_bytes);

    if !declared_outputs.is_empty() && !declared_outputs.iter().any(|a| a == &address) {
        return Err(DomainError::invalid(
            "Output address does not match signer's measurement address.",
        ));
    }

    if addresses_not_empty(ctx, &[address.clone()])? {
        return Err(DomainError::invalid(format!(
            "Address already in use \"{address}\"!"
        )));
    }

    let measurement = Measurement {
        amount: request.amount,
        kind: request.kind,
        begin: request.begin,
        end: request.end,
        sector: request.sector,
    };
    let bytes = serde_json::to_vec(&measurement)
        .map_err(|e| DomainError::internal(format!("failed to encode measurement: {e}")))?;

    let mut updates = std::collections::BTreeMap::new();
    updates.insert(address, bytes);
    ctx.write(updates)
}
