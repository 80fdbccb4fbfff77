//! The six transaction handlers and the guards they share.
//!
//! Each submodule exposes a pure `apply` function operating on [`Ctx`] plus
//! a `*Handler` struct implementing `sawtooth_sdk`'s [`TransactionHandler`]
//! trait. The `*Handler` structs are the only place this crate talks
//! `sawtooth_sdk` protobuf types directly; everything below `apply` is
//! SDK-agnostic and directly testable.

pub mod framework;
pub mod issue_ggo;
pub mod publish_measurement;
pub mod retire_ggo;
pub mod settlement;
pub mod split_ggo;
pub mod transfer_ggo;

use std::sync::Arc;

use sawtooth_sdk::messages::processor::TpProcessRequest;
use sawtooth_sdk::processor::handler::{ApplyError, TransactionContext, TransactionHandler};

use crate::address::Family;
use crate::context::Ctx;
use crate::policy::Policy;

const FAMILY_VERSION: &str = "0.1";

fn namespaces(families: &[Family]) -> Vec<String> {
    families.iter().map(|f| f.prefix()).collect()
}

pub struct PublishMeasurementHandler {
    policy: Arc<Policy>,
}

impl PublishMeasurementHandler {
    pub fn new(policy: Arc<Policy>) -> Self {
        Self { policy }
    }
}

impl TransactionHandler for PublishMeasurementHandler {
    fn family_name(&self) -> String {
        publish_measurement::FAMILY_NAME.to_string()
    }

    fn family_versions(&self) -> Vec<String> {
        vec![FAMILY_VERSION.to_string()]
    }

    fn namespaces(&self) -> Vec<String> {
        namespaces(&[Family::Measurement])
    }

    fn apply(
        &self,
        request: &TpProcessRequest,
        context: &mut dyn TransactionContext,
    ) -> Result<(), ApplyError> {
        let header = request.get_header();
        let signer = header.get_signer_public_key();
        let outputs: Vec<String> = header.get_outputs().to_vec();
        tracing::debug!(family = %self.family_name(), signer, "applying transaction");
        let mut ctx = Ctx::new(context);
        publish_measurement::apply(&mut ctx, signer, &outputs, request.get_payload(), &self.policy)
            .map_err(ApplyError::from)
    }
}

pub struct IssueGgoHandler {
    policy: Arc<Policy>,
}

impl IssueGgoHandler {
    pub fn new(policy: Arc<Policy>) -> Self {
        Self { policy }
    }
}

impl TransactionHandler for IssueGgoHandler {
    fn family_name(&self) -> String {
        issue_ggo::FAMILY_NAME.to_string()
    }

    fn family_versions(&self) -> Vec<String> {
        vec![FAMILY_VERSION.to_string()]
    }

    fn namespaces(&self) -> Vec<String> {
        namespaces(&[Family::Ggo])
    }

    fn apply(
        &self,
        request: &TpProcessRequest,
        context: &mut dyn TransactionContext,
    ) -> Result<(), ApplyError> {
        let header = request.get_header();
        let signer = header.get_signer_public_key();
        tracing::debug!(family = %self.family_name(), signer, "applying transaction");
        let mut ctx = Ctx::new(context);
        issue_ggo::apply(&mut ctx, signer, request.get_payload(), &self.policy)
            .map_err(ApplyError::from)
    }
}

pub struct SplitGgoHandler;

impl TransactionHandler for SplitGgoHandler {
    fn family_name(&self) -> String {
        split_ggo::FAMILY_NAME.to_string()
    }

    fn family_versions(&self) -> Vec<String> {
        vec![FAMILY_VERSION.to_string()]
    }

    fn namespaces(&self) -> Vec<String> {
        namespaces(&[Family::Ggo])
    }

    fn apply(
        &self,
        request: &TpProcessRequest,
        context: &mut dyn TransactionContext,
    ) -> Result<(), ApplyError> {
        let header = request.get_header();
        let signer = header.get_signer_public_key();
        tracing::debug!(family = %self.family_name(), signer, "applying transaction");
        let mut ctx = Ctx::new(context);
        split_ggo::apply(&mut ctx, signer, request.get_payload()).map_err(ApplyError::from)
    }
}

pub struct TransferGgoHandler;

impl TransactionHandler for TransferGgoHandler {
    fn family_name(&self) -> String {
        transfer_ggo::FAMILY_NAME.to_string()
    }

    fn family_versions(&self) -> Vec<String> {
        vec![FAMILY_VERSION.to_string()]
    }

    fn namespaces(&self) -> Vec<String> {
        namespaces(&[Family::Ggo])
    }

    fn apply(
        &self,
        request: &TpProcessRequest,
        context: &mut dyn TransactionContext,
    ) -> Result<(), ApplyError> {
        let header = request.get_header();
        let signer = header.get_signer_public_key();
        tracing::debug!(family = %self.family_name(), signer, "applying transaction");
        let mut ctx = Ctx::new(context);
        transfer_ggo::apply(&mut ctx, signer, request.get_payload()).map_err(ApplyError::from)
    }
}

pub struct RetireGgoHandler;

impl TransactionHandler for RetireGgoHandler {
    fn family_name(&self) -> String {
        retire_ggo::FAMILY_NAME.to_string()
    }

    fn family_versions(&self) -> Vec<String> {
        vec![FAMILY_VERSION.to_string()]
    }

    fn namespaces(&self) -> Vec<String> {
        namespaces(&[Family::Ggo])
    }

    fn apply(
        &self,
        request: &TpProcessRequest,
        context: &mut dyn TransactionContext,
    ) -> Result<(), ApplyError> {
        let header = request.get_header();
        let signer = header.get_signer_public_key();
        tracing::debug!(family = %self.family_name(), signer, "applying transaction");
        let mut ctx = Ctx::new(context);
        retire_ggo::apply(&mut ctx, signer, request.get_payload()).map_err(ApplyError::from)
    }
}

pub struct SettlementHandler;

impl TransactionHandler for SettlementHandler {
    fn family_name(&self) -> String {
        settlement::FAMILY_NAME.to_string()
    }

    fn family_versions(&self) -> Vec<String> {
        vec![FAMILY_VERSION.to_string()]
    }

    fn namespaces(&self) -> Vec<String> {
        namespaces(&[Family::Ggo, Family::Settlement, Family::Measurement])
    }

    fn apply(
        &self,
        request: &TpProcessRequest,
        context: &mut dyn TransactionContext,
    ) -> Result<(), ApplyError> {
        let header = request.get_header();
        let signer = header.get_signer_public_key();
        tracing::debug!(family = %self.family_name(), signer, "applying transaction");
        let mut ctx = Ctx::new(context);
        settlement::apply(&mut ctx, signer, request.get_payload()).map_err(ApplyError::from)
    }
}
