//! Process-level configuration.
//!
//! Collected once in `main` before any handler is registered rather than
//! re-read per call.

use std::env;

use crate::policy::Policy;

const DEFAULT_PORT: &str = "4004";

#[derive(Clone, Debug)]
pub struct ProcessorConfig {
    /// Validator ZMQ endpoint to connect to.
    pub endpoint: String,
}

impl ProcessorConfig {
    /// `LEDGER_URL`, falling back to `tcp://{HOSTNAME|localhost}:4004`.
    pub fn from_env() -> Self {
        let endpoint = env::var("LEDGER_URL").unwrap_or_else(|_| {
            let host = env::var("HOSTNAME").unwrap_or_else(|_| "localhost".to_string());
            format!("tcp://{host}:{DEFAULT_PORT}")
        });
        Self { endpoint }
    }

    pub fn with_endpoint(endpoint: String) -> Self {
        Self { endpoint }
    }
}

/// Load the optional issuer/publisher policy named by `GGO_POLICY_FILE`.
/// Absence of the variable (or the file) means default-open.
pub fn load_policy() -> anyhow::Result<Policy> {
    match env::var("GGO_POLICY_FILE") {
        Ok(path) => Policy::from_file(std::path::Path::new(&path)),
        Err(_) => Ok(Policy::open()),
    }
}
