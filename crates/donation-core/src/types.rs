use serde::{Deserialize, Serialize};

/// Mainnet USDC mint. Its precision is fixed at 6 by convention, so builds
/// skip the mint query for it.
pub const MAINNET_USDC_MINT: &str = "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v";

pub const USDC_DECIMALS: u8 = 6;

/// A fungible token identified by its mint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenAsset {
    pub mint: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    /// Per-asset dust floor in UI units; falls back to the configured token
    /// minimum when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_amount_ui: Option<f64>,
}

/// What is being donated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AssetSpecifier {
    Native,
    Token(TokenAsset),
}

impl AssetSpecifier {
    pub fn token(mint: impl Into<String>) -> Self {
        AssetSpecifier::Token(TokenAsset {
            mint: mint.into(),
            symbol: None,
            min_amount_ui: None,
        })
    }

    pub fn usdc() -> Self {
        AssetSpecifier::Token(TokenAsset {
            mint: MAINNET_USDC_MINT.into(),
            symbol: Some("USDC".into()),
            min_amount_ui: None,
        })
    }

    pub fn is_native(&self) -> bool {
        matches!(self, AssetSpecifier::Native)
    }

    /// Ticker shown in user-facing text.
    pub fn display_symbol(&self) -> &str {
        match self {
            AssetSpecifier::Native => "SOL",
            AssetSpecifier::Token(token) => token.symbol.as_deref().unwrap_or("token"),
        }
    }
}

/// One donation attempt, as the wallet UI submits it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DonationRequest {
    pub charity_id: String,
    pub asset: AssetSpecifier,
    /// UI-denominated amount (SOL, or whole tokens).
    pub amount: f64,
    /// Overrides the configured native fee buffer for this request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fee_buffer: Option<f64>,
}

impl DonationRequest {
    pub fn new(charity_id: impl Into<String>, asset: AssetSpecifier, amount: f64) -> Self {
        Self {
            charity_id: charity_id.into(),
            asset,
            amount,
            fee_buffer: None,
        }
    }

    pub fn with_fee_buffer(mut self, fee_buffer: f64) -> Self {
        self.fee_buffer = Some(fee_buffer);
        self
    }
}
