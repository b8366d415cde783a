//! Tunable amount policy.
//!
//! Wallets can ship their own values as JSON; any field left out keeps its
//! default.

use serde::{Deserialize, Serialize};

use crate::error::DonationError;

/// Native balance kept back so the payer can still cover network fees.
pub const DEFAULT_FEE_BUFFER: f64 = 0.002;

/// Smallest native donation accepted, in SOL.
pub const DEFAULT_NATIVE_MINIMUM: f64 = 0.000_001;

/// Smallest token donation accepted when the asset does not set its own.
pub const DEFAULT_TOKEN_MINIMUM: f64 = 0.01;

pub const NATIVE_LADDER: [f64; 7] = [0.001, 0.002, 0.005, 0.01, 0.02, 0.05, 0.1];

pub const TOKEN_LADDER: [f64; 7] = [0.25, 0.5, 1.0, 2.0, 5.0, 10.0, 20.0];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    pub fee_buffer: f64,
    pub native_minimum: f64,
    pub token_minimum: f64,
    pub native_ladder: Vec<f64>,
    pub token_ladder: Vec<f64>,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            fee_buffer: DEFAULT_FEE_BUFFER,
            native_minimum: DEFAULT_NATIVE_MINIMUM,
            token_minimum: DEFAULT_TOKEN_MINIMUM,
            native_ladder: NATIVE_LADDER.to_vec(),
            token_ladder: TOKEN_LADDER.to_vec(),
        }
    }
}

impl PolicyConfig {
    pub fn from_json(json: &str) -> Result<Self, DonationError> {
        let config: PolicyConfig = serde_json::from_str(json)
            .map_err(|e| DonationError::InvalidConfig(format!("malformed JSON: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), DonationError> {
        let non_negative = |name: &str, v: f64| {
            if v.is_finite() && v >= 0.0 {
                Ok(())
            } else {
                Err(DonationError::InvalidConfig(format!(
                    "{name} must be a finite non-negative number, got {v}"
                )))
            }
        };
        non_negative("fee_buffer", self.fee_buffer)?;
        non_negative("native_minimum", self.native_minimum)?;
        non_negative("token_minimum", self.token_minimum)?;

        for (name, ladder) in [
            ("native_ladder", &self.native_ladder),
            ("token_ladder", &self.token_ladder),
        ] {
            let ascending = ladder.windows(2).all(|w| w[0] < w[1]);
            let positive = ladder.iter().all(|v| v.is_finite() && *v > 0.0);
            if !ascending || !positive {
                return Err(DonationError::InvalidConfig(format!(
                    "{name} must hold strictly ascending positive amounts"
                )));
            }
        }

        Ok(())
    }
}
