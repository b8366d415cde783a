//! Donation transaction planning for a wallet-connected client.
//!
//! Given a charity id, an asset, a UI amount and the payer's key, the
//! planner either returns the charity's external donation URL or an
//! unsigned transaction (native SOL transfer, or SPL `TransferChecked`
//! with the recipient token account created on demand). Signing,
//! broadcasting and confirmation belong to the wallet.
//!
//! ```no_run
//! use donation_core::{AssetSpecifier, CharityRegistry, DonationPlanner, DonationRequest};
//! # async fn run<L: donation_core::LedgerQuery>(rpc: &L, payer: [u8; 32]) -> Result<(), donation_core::DonationError> {
//! let planner = DonationPlanner::new(CharityRegistry::builtin())
//!     .with_rpc_endpoint("https://api.mainnet-beta.solana.com");
//! let request = DonationRequest::new("rfus", AssetSpecifier::Native, 0.01);
//! let plan = planner.plan(rpc, &payer, &request).await?;
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod explorer;
pub mod ledger;
pub mod native;
pub mod options;
pub mod planner;
pub mod policy;
pub mod registry;
pub mod token;
pub mod transaction;
pub mod types;

pub use builder::build_donation_transaction;
pub use config::PolicyConfig;
pub use error::{DonationError, FaultKind};
pub use explorer::{explorer_address_url, explorer_tx_url, Cluster};
pub use ledger::{AccountInfo, LatestBlockhash, LedgerError, LedgerQuery, MintInfo};
pub use native::build_native_transfer;
pub use options::{resolve_donation_options, AssetBalance, CharityOption, DonationOptions};
pub use planner::{DonationPlan, DonationPlanner, ExternalRedirectPlan, OnChainPlan, RecipientInfo};
pub use policy::{quick_pick_amounts, spendable_balance, QuickPick};
pub use registry::{CharityMode, CharityRecord, CharityRegistry, Verification};
pub use token::build_token_transfer;
pub use transaction::UnsignedDonationTransaction;
pub use types::{AssetSpecifier, DonationRequest, TokenAsset};
