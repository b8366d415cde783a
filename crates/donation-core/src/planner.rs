//! Top-level donation flow: redirect out, or build on chain.
//!
//! The charity's mode is checked first and unconditionally. A request for an
//! external-redirect charity returns its URL without touching the ledger,
//! so no transaction is ever built toward an address that was not vetted
//! for on-chain use.

use serde::Serialize;

use crate::builder::build_donation_transaction;
use crate::config::PolicyConfig;
use crate::error::DonationError;
use crate::explorer::{explorer_tx_url, Cluster};
use crate::ledger::LedgerQuery;
use crate::registry::{CharityMode, CharityRecord, CharityRegistry, Verification};
use crate::transaction::UnsignedDonationTransaction;
use crate::types::{AssetSpecifier, DonationRequest};

/// Who receives the donation, with the metadata the wallet shows for trust.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipientInfo {
    pub charity_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub verification: Verification,
}

impl RecipientInfo {
    fn from_record(record: &CharityRecord, address: Option<&str>) -> Self {
        Self {
            charity_id: record.id.clone(),
            name: record.name.clone(),
            address: address.map(str::to_string),
            verification: record.verification.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct OnChainPlan {
    pub transaction: UnsignedDonationTransaction,
    pub recipient: RecipientInfo,
    pub asset: AssetSpecifier,
    pub amount: f64,
    pub cluster: Cluster,
    /// Append the signature once the wallet has broadcast the transaction.
    pub explorer_tx_prefix: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExternalRedirectPlan {
    pub donation_url: String,
    pub recipient: RecipientInfo,
}

#[derive(Debug, Clone)]
pub enum DonationPlan {
    OnChain(OnChainPlan),
    External(ExternalRedirectPlan),
}

impl DonationPlan {
    pub fn recipient(&self) -> &RecipientInfo {
        match self {
            DonationPlan::OnChain(plan) => &plan.recipient,
            DonationPlan::External(plan) => &plan.recipient,
        }
    }

    pub fn is_external(&self) -> bool {
        matches!(self, DonationPlan::External(_))
    }
}

pub struct DonationPlanner<'r> {
    registry: &'r CharityRegistry,
    config: PolicyConfig,
    cluster: Cluster,
}

impl<'r> DonationPlanner<'r> {
    /// Planner over `registry` with default policy, targeting mainnet.
    pub fn new(registry: &'r CharityRegistry) -> Self {
        Self {
            registry,
            config: PolicyConfig::default(),
            cluster: Cluster::MainnetBeta,
        }
    }

    pub fn with_config(mut self, config: PolicyConfig) -> Result<Self, DonationError> {
        config.validate()?;
        self.config = config;
        Ok(self)
    }

    /// Infer the cluster from the RPC endpoint the wallet is connected to.
    pub fn with_rpc_endpoint(mut self, endpoint: &str) -> Self {
        self.cluster = Cluster::infer_from_rpc(endpoint);
        self
    }

    pub fn cluster(&self) -> Cluster {
        self.cluster
    }

    pub fn config(&self) -> &PolicyConfig {
        &self.config
    }

    pub async fn plan<L: LedgerQuery>(
        &self,
        ledger: &L,
        payer: &[u8; 32],
        request: &DonationRequest,
    ) -> Result<DonationPlan, DonationError> {
        let record = self.registry.lookup(&request.charity_id)?;
        self.plan_for_record(
            ledger,
            payer,
            record,
            &request.asset,
            request.amount,
            request.fee_buffer,
        )
        .await
    }

    /// Plan against a record that did not necessarily come from this
    /// planner's registry.
    pub async fn plan_for_record<L: LedgerQuery>(
        &self,
        ledger: &L,
        payer: &[u8; 32],
        record: &CharityRecord,
        asset: &AssetSpecifier,
        amount: f64,
        fee_buffer: Option<f64>,
    ) -> Result<DonationPlan, DonationError> {
        match record.mode {
            CharityMode::ExternalRedirect => {
                let donation_url = record.redirect_url().inspect_err(|_| {
                    tracing::warn!(charity_id = %record.id, "external charity has no donation URL");
                })?;
                tracing::debug!(charity_id = %record.id, "planning external redirect");
                Ok(DonationPlan::External(ExternalRedirectPlan {
                    donation_url: donation_url.to_string(),
                    recipient: RecipientInfo::from_record(record, None),
                }))
            }
            CharityMode::Direct => {
                let address = record.recipient_address().inspect_err(|_| {
                    tracing::warn!(charity_id = %record.id, "direct charity has no address");
                })?;
                tracing::debug!(
                    charity_id = %record.id,
                    asset = asset.display_symbol(),
                    amount,
                    cluster = %self.cluster,
                    "planning on-chain donation"
                );
                let transaction = build_donation_transaction(
                    ledger,
                    payer,
                    record,
                    asset,
                    amount,
                    fee_buffer,
                    &self.config,
                )
                .await?;

                Ok(DonationPlan::OnChain(OnChainPlan {
                    transaction,
                    recipient: RecipientInfo::from_record(record, Some(address)),
                    asset: asset.clone(),
                    amount,
                    cluster: self.cluster,
                    explorer_tx_prefix: explorer_tx_url("", self.cluster),
                }))
            }
        }
    }
}
