//! Amount validation, dust floors, fee-buffer math and quick-pick amounts.
//!
//! Amounts arrive as UI-denominated `f64`. Floating point is confined to the
//! single conversion into integral base units ([`to_lamports`],
//! [`to_base_units`]); everything downstream is `u64`.

use serde::Serialize;

use crate::config::PolicyConfig;
use crate::error::DonationError;
use crate::types::{AssetSpecifier, TokenAsset};

pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;
pub const NATIVE_DECIMALS: u8 = 9;

/// Most suggestions shown at once.
pub const MAX_QUICK_PICKS: usize = 4;

pub const BALANCE_TOO_LOW: &str = "Balance too low for suggested donation buttons.";

/// Reject amounts that are not finite or not strictly positive.
pub fn validate_amount(amount: f64) -> Result<(), DonationError> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(DonationError::InvalidAmount);
    }
    Ok(())
}

/// The dust floor for `asset`, in UI units.
pub fn minimum_amount_for(asset: &AssetSpecifier, config: &PolicyConfig) -> f64 {
    match asset {
        AssetSpecifier::Native => config.native_minimum,
        AssetSpecifier::Token(token) => token_minimum(token, config),
    }
}

pub fn token_minimum(token: &TokenAsset, config: &PolicyConfig) -> f64 {
    token.min_amount_ui.unwrap_or(config.token_minimum)
}

/// [`validate_amount`] followed by the dust floor for `asset`.
pub fn check_amount(
    amount: f64,
    asset: &AssetSpecifier,
    config: &PolicyConfig,
) -> Result<(), DonationError> {
    check_minimum(amount, minimum_amount_for(asset, config))
}

pub fn check_minimum(amount: f64, minimum: f64) -> Result<(), DonationError> {
    validate_amount(amount)?;
    if amount < minimum {
        return Err(DonationError::AmountTooSmall { amount, minimum });
    }
    Ok(())
}

/// `max(0, balance - fee_buffer)` in UI units, for display. Non-finite or
/// negative inputs count as 0.
pub fn spendable_balance(balance: f64, fee_buffer: f64) -> f64 {
    (clamp(balance) - clamp(fee_buffer)).max(0.0)
}

/// Fee buffer in lamports, rounded to the nearest lamport. Non-finite or
/// negative buffers count as 0.
pub fn fee_buffer_lamports(fee_buffer: f64) -> u64 {
    // `as` saturates, so an oversized buffer leaves nothing spendable.
    (clamp(fee_buffer) * LAMPORTS_PER_SOL as f64).round() as u64
}

/// `balance - fee_buffer` in lamports, floored at 0.
pub fn spendable_lamports(balance_lamports: u64, fee_buffer: f64) -> u64 {
    balance_lamports.saturating_sub(fee_buffer_lamports(fee_buffer))
}

/// Reject a native `amount` whose lamport value exceeds `spendable`.
pub fn ensure_within_balance(amount: f64, spendable: u64) -> Result<(), DonationError> {
    if to_lamports(amount)? > spendable {
        return Err(DonationError::ExceedsAvailableBalance {
            amount,
            available: from_base_units(spendable, NATIVE_DECIMALS),
        });
    }
    Ok(())
}

pub(crate) fn clamp(n: f64) -> f64 {
    if n.is_finite() && n > 0.0 {
        n
    } else {
        0.0
    }
}

/// Suggested donation buttons for one asset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuickPick {
    /// Ascending, each within `[min, max]`.
    pub amounts: Vec<f64>,
    /// Largest amount that may be donated.
    pub max: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// Pick up to [`MAX_QUICK_PICKS`] of the largest ladder values in
/// `[min, max]`, keeping ascending order.
pub fn quick_pick_amounts(ladder: &[f64], min: f64, max: f64) -> QuickPick {
    let eligible: Vec<f64> = ladder
        .iter()
        .copied()
        .filter(|&x| x >= min && x <= max)
        .collect();
    let amounts = eligible[eligible.len().saturating_sub(MAX_QUICK_PICKS)..].to_vec();

    let warning = amounts.is_empty().then(|| BALANCE_TOO_LOW.to_string());
    QuickPick {
        amounts,
        max,
        warning,
    }
}

/// `floor(amount * 10^9)`.
pub fn to_lamports(amount: f64) -> Result<u64, DonationError> {
    scale(amount, 1e9, f64::floor)
}

/// `round(amount * 10^decimals)`. Lossy; the caller must reject a
/// zero result instead of sending it.
pub fn to_base_units(amount: f64, decimals: u8) -> Result<u64, DonationError> {
    scale(amount, 10f64.powi(decimals as i32), f64::round)
}

pub fn from_base_units(units: u64, decimals: u8) -> f64 {
    units as f64 / 10f64.powi(decimals as i32)
}

fn scale(amount: f64, factor: f64, mode: fn(f64) -> f64) -> Result<u64, DonationError> {
    validate_amount(amount)?;
    let scaled = mode(amount * factor);
    // u64::MAX is not representable; its f64 rounding is 2^64.
    if !scaled.is_finite() || scaled >= u64::MAX as f64 {
        return Err(DonationError::AmountOverflow(amount));
    }
    Ok(scaled as u64)
}
