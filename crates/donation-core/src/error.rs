use thiserror::Error;

use crate::ledger::LedgerError;

/// Broad classes of donation faults, used by callers to decide between
/// surfacing text to the user, retrying, or treating the build as a bug.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultKind {
    /// Bad static data (unknown charity, record missing its mode's field).
    Configuration,
    /// Caller-correctable input (amount, address, mint).
    Validation,
    /// Transient ledger query failure; the whole build may be retried.
    Network,
    /// A direct build was attempted against an external-redirect charity.
    ModeMismatch,
}

#[derive(Debug, Error)]
pub enum DonationError {
    #[error("Unknown charity id: {0}")]
    UnknownCharity(String),

    #[error("Charity recipient address is missing for {0}")]
    MissingRecipientAddress(String),

    #[error("External donation URL missing for charity {0}")]
    MissingRedirectUrl(String),

    #[error("Invalid charity registry: {0}")]
    InvalidRegistry(String),

    #[error("Invalid policy configuration: {0}")]
    InvalidConfig(String),

    #[error("Amount must be greater than 0.")]
    InvalidAmount,

    #[error("Amount too small (min {minimum}).")]
    AmountTooSmall { amount: f64, minimum: f64 },

    #[error("Amount {amount} exceeds available balance {available}.")]
    ExceedsAvailableBalance { amount: f64, available: f64 },

    #[error("Amount {0} is too large to encode in base units.")]
    AmountOverflow(f64),

    #[error("Recipient address is invalid: {0}")]
    InvalidRecipient(String),

    #[error("Token mint is invalid: {0}")]
    InvalidMint(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("This charity uses an external donation flow: {0}")]
    ModeMismatch(String),

    #[error("Transaction build failed: {0}")]
    TransactionFailed(#[from] chain_sol::SolError),
}

impl DonationError {
    pub fn kind(&self) -> FaultKind {
        match self {
            DonationError::UnknownCharity(_)
            | DonationError::MissingRecipientAddress(_)
            | DonationError::MissingRedirectUrl(_)
            | DonationError::InvalidRegistry(_)
            | DonationError::InvalidConfig(_) => FaultKind::Configuration,
            DonationError::InvalidAmount
            | DonationError::AmountTooSmall { .. }
            | DonationError::ExceedsAvailableBalance { .. }
            | DonationError::AmountOverflow(_)
            | DonationError::InvalidRecipient(_)
            | DonationError::InvalidMint(_)
            | DonationError::TransactionFailed(_) => FaultKind::Validation,
            DonationError::Network(_) => FaultKind::Network,
            DonationError::ModeMismatch(_) => FaultKind::ModeMismatch,
        }
    }

    /// Only network faults are worth retrying, and then only with a fresh build.
    pub fn is_retryable(&self) -> bool {
        self.kind() == FaultKind::Network
    }
}

impl From<LedgerError> for DonationError {
    fn from(e: LedgerError) -> Self {
        DonationError::Network(e.to_string())
    }
}

/// `map_err` adapter for ledger calls: logs which query failed, then
/// converts to [`DonationError::Network`].
pub(crate) fn network_fault(query: &'static str) -> impl Fn(LedgerError) -> DonationError {
    move |e| {
        tracing::warn!(query, error = %e, "ledger query failed");
        DonationError::from(e)
    }
}
