//! Configurable issuer/publisher authorization.
//!
//! Rather than leave GGO issuance and measurement publication open to any
//! signer, or hard-code a single organization's key, authorization is an
//! explicit, swappable policy: `None` means default-open, `Some(set)`
//! restricts the operation to a fixed set of signer public keys.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;

pub type PublicKeyHex = String;

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Policy {
    #[serde(default)]
    allowed_issuers: Option<HashSet<PublicKeyHex>>,
    #[serde(default)]
    allowed_publishers: Option<HashSet<PublicKeyHex>>,
}

impl Policy {
    /// Default-open policy: both `IssueGGO` and `PublishMeasurement` accept
    /// any signer. This is what the processor runs with when `GGO_POLICY_FILE`
    /// is unset.
    pub fn open() -> Self {
        Self {
            allowed_issuers: None,
            allowed_publishers: None,
        }
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    pub fn allows_issuer(&self, signer_public_key_hex: &str) -> bool {
        match &self.allowed_issuers {
            None => true,
            Some(set) => set.contains(signer_public_key_hex),
        }
    }

    pub fn allows_publisher(&self, signer_public_key_hex: &str) -> bool {
        match &self.allowed_publishers {
            None => true,
            Some(set) => set.contains(signer_public_key_hex),
        }
    }
}
