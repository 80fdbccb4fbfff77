//! State address derivation.
//!
//! A ledger address is 70 lowercase hex characters: a 6-char family prefix
//! followed by the first 64 hex chars of `SHA-512(public_key_bytes)`. Since
//! the tail is a pure function of the public key, address identity doubles
//! as authorization — see [`check_owner`].

use sha2::{Digest, Sha512};

pub const ADDRESS_LEN: usize = 70;
pub const PREFIX_LEN: usize = 6;

/// The three entity families this processor owns addresses in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Family {
    Measurement,
    Ggo,
    Settlement,
}

impl Family {
    pub fn name(self) -> &'static str {
        match self {
            Family::Measurement => "MEASUREMENT",
            Family::Ggo => "GGO",
            Family::Settlement => "SETTLEMENT",
        }
    }

    /// The 6-hex-char namespace prefix this family's addresses live under.
    pub fn prefix(self) -> String {
        family_prefix(self.name())
    }
}

/// First 6 hex chars of `SHA-512(name)`, used as a family's namespace prefix.
pub fn family_prefix(name: &str) -> String {
    let digest = Sha512::digest(name.as_bytes());
    hex::encode(digest)[..PREFIX_LEN].to_string()
}

/// First 64 hex chars of `SHA-512(public_key_bytes)` — the key-derived tail
/// shared by an owner's addresses across every family.
pub fn key_tail_hex(public_key_bytes: &[u8]) -> String {
    let digest = Sha512::digest(public_key_bytes);
    hex::encode(digest)[..ADDRESS_LEN - PREFIX_LEN].to_string()
}

/// Compute the canonical 70-hex-char address for `family` owned by
/// `public_key_bytes`.
pub fn derive_address(family: Family, public_key_bytes: &[u8]) -> String {
    format!("{}{}", family.prefix(), key_tail_hex(public_key_bytes))
}

/// Recompute the expected address for `family`/`signer_pk` and compare it to
/// `address`. This is the sole authorization mechanism in this processor:
/// there is no ACL store, only "does this address derive from this key".
pub fn check_owner(address: &str, family: Family, signer_public_key_hex: &str) -> bool {
    match hex::decode(signer_public_key_hex) {
        Ok(bytes) => derive_address(family, &bytes) == address,
        Err(_) => false,
    }
}

/// The 64-char key-derived tail of an address (bytes 6..70), used by
/// [`crate::handler::settlement`] to bind a settlement address to its
/// consumption measurement address.
pub fn tail(address: &str) -> &str {
    &address[PREFIX_LEN..]
}
