//! Entity records stored in ledger state and their canonical JSON encoding.
//!
//! Every entity round-trips through `serde_json` identically. `emissions`
//! uses a `BTreeMap` rather than a `HashMap` so key order is stable across
//! serializations.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Default sector allow-list. Supplemented as a configurable const slice
/// rather than hard-coded checks scattered through handlers — widen it by
/// editing this list alone.
pub const DEFAULT_SECTORS: &[&str] = &["DK1", "DK2"];

pub fn sector_allowed(sector: &str, allow_list: &[&str]) -> bool {
    allow_list.iter().any(|s| *s == sector)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MeasurementType {
    #[serde(rename = "PRODUCTION")]
    Production,
    #[serde(rename = "CONSUMPTION")]
    Consumption,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub amount: u64,
    #[serde(rename = "type")]
    pub kind: MeasurementType,
    pub begin: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub sector: String,
}

impl Measurement {
    /// `end = begin + 1 hour` exactly, `begin < end`.
    pub fn has_valid_hourly_interval(&self) -> bool {
        self.begin < self.end && self.end - self.begin == Duration::hours(1)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GgoAction {
    #[serde(rename = "TRANSFER")]
    Transfer,
    #[serde(rename = "SPLIT")]
    Split,
    #[serde(rename = "RETIRE")]
    Retire,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GgoNext {
    pub action: GgoAction,
    pub addresses: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EmissionValue {
    pub value: f64,
    pub unit: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ggo {
    pub origin: String,
    pub amount: u64,
    pub begin: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub sector: String,
    pub tech_type: String,
    pub fuel_type: String,
    #[serde(default)]
    pub emissions: BTreeMap<String, EmissionValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<GgoNext>,
}

impl Ggo {
    /// A GGO with `next != null` can never be re-consumed (invariant 1).
    pub fn is_consumed(&self) -> bool {
        self.next.is_some()
    }

    /// Clone the fields that must stay invariant along a GGO's causal chain
    /// to its production measurement (invariant 2), with a new `origin` and
    /// `amount`.
    pub fn child(&self, origin: String, amount: u64) -> Ggo {
        Ggo {
            origin,
            amount,
            begin: self.begin,
            end: self.end,
            sector: self.sector.clone(),
            tech_type: self.tech_type.clone(),
            fuel_type: self.fuel_type.clone(),
            emissions: self.emissions.clone(),
            next: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SettlementPart {
    pub ggo: String,
    pub amount: u64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Settlement {
    pub measurement: String,
    #[serde(default)]
    pub parts: Vec<SettlementPart>,
}

impl Settlement {
    pub fn contains_ggo(&self, ggo_address: &str) -> bool {
        self.parts.iter().any(|p| p.ggo == ggo_address)
    }

    pub fn total_amount(&self) -> u64 {
        self.parts.iter().map(|p| p.amount).sum()
    }
}
