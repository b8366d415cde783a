//! Read-only ledger access used while building donations.
//!
//! The RPC client lives with the embedding application. Builders only need
//! three queries, each awaited before the instruction that depends on it is
//! appended.

use std::future::Future;

use thiserror::Error;

/// Failure reported by a ledger-query implementation.
#[derive(Debug, Clone, Error)]
#[error("ledger query failed: {0}")]
pub struct LedgerError(pub String);

impl LedgerError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

/// The subset of an on-chain account the builders look at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountInfo {
    pub lamports: u64,
    pub owner: [u8; 32],
    pub data_len: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MintInfo {
    pub decimals: u8,
}

/// A recent blockhash and the last block height at which a transaction
/// referencing it is still accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatestBlockhash {
    pub blockhash: [u8; 32],
    pub last_valid_block_height: u64,
}

/// Abstract ledger-query handle.
///
/// Implementations may suspend on network I/O. Dropping a returned future
/// abandons the query with no side effects.
pub trait LedgerQuery {
    /// `Ok(None)` means the account does not exist.
    fn get_account_info(
        &self,
        address: &[u8; 32],
    ) -> impl Future<Output = Result<Option<AccountInfo>, LedgerError>> + Send;

    fn get_latest_blockhash(
        &self,
    ) -> impl Future<Output = Result<LatestBlockhash, LedgerError>> + Send;

    fn get_mint_info(
        &self,
        mint: &[u8; 32],
    ) -> impl Future<Output = Result<MintInfo, LedgerError>> + Send;
}
