//! What a wallet shows before the user picks a donation: eligible charities
//! and quick-pick amounts per held asset.

use serde::{Deserialize, Serialize};

use crate::config::PolicyConfig;
use crate::policy::{self, QuickPick};
use crate::registry::{CharityMode, CharityRegistry, Verification};
use crate::types::AssetSpecifier;

pub const NOT_ENOUGH_FOR_FEES: &str = "Not enough SOL to cover network fees.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EligibleAssets {
    Native,
    NativeAndToken,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CharityOption {
    pub charity_id: String,
    pub name: String,
    pub description: String,
    pub mode: CharityMode,
    pub verification: Verification,
    /// Present for external-redirect charities; the wallet links out.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub donation_url: Option<String>,
    pub eligible_assets: EligibleAssets,
}

/// An asset the wallet holds. `balance` is in UI units; unknown counts as 0.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AssetBalance {
    pub asset: AssetSpecifier,
    #[serde(default)]
    pub balance: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssetQuickPick {
    pub asset: AssetSpecifier,
    #[serde(flatten)]
    pub pick: QuickPick,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DonationOptions {
    pub charities: Vec<CharityOption>,
    pub quick_picks: Vec<AssetQuickPick>,
}

pub fn resolve_donation_options(
    registry: &CharityRegistry,
    assets: &[AssetBalance],
    config: &PolicyConfig,
    include_external: bool,
) -> DonationOptions {
    let charities = registry
        .list(include_external)
        .into_iter()
        .map(|c| CharityOption {
            charity_id: c.id.clone(),
            name: c.name.clone(),
            description: c.description.clone(),
            mode: c.mode,
            verification: c.verification.clone(),
            donation_url: c.donation_url.clone(),
            eligible_assets: match c.mode {
                CharityMode::Direct => EligibleAssets::NativeAndToken,
                CharityMode::ExternalRedirect => EligibleAssets::Native,
            },
        })
        .collect();

    let quick_picks = assets
        .iter()
        .map(|held| AssetQuickPick {
            asset: held.asset.clone(),
            pick: quick_pick_for(held, config),
        })
        .collect();

    DonationOptions {
        charities,
        quick_picks,
    }
}

fn quick_pick_for(held: &AssetBalance, config: &PolicyConfig) -> QuickPick {
    let balance = policy::clamp(held.balance.unwrap_or(0.0));

    match &held.asset {
        AssetSpecifier::Native => {
            let max = policy::spendable_balance(balance, config.fee_buffer);
            let mut pick = policy::quick_pick_amounts(&config.native_ladder, config.native_minimum, max);
            if balance <= config.fee_buffer {
                pick.warning = Some(NOT_ENOUGH_FOR_FEES.to_string());
            }
            pick
        }
        AssetSpecifier::Token(token) => {
            // Token fees are paid in SOL, which the wallet lists as its own asset.
            let min = policy::token_minimum(token, config);
            let mut pick = policy::quick_pick_amounts(&config.token_ladder, min, balance);
            if pick.warning.is_some() {
                pick.warning = Some(format!(
                    "Balance too low for suggested {} donation buttons.",
                    held.asset.display_symbol()
                ));
            }
            pick
        }
    }
}
