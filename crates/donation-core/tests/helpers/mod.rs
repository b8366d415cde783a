//! In-memory ledger shared by the integration tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use donation_core::{AccountInfo, LatestBlockhash, LedgerError, LedgerQuery, MintInfo};

pub const PAYER: [u8; 32] = [0x42; 32];
pub const BLOCKHASH: [u8; 32] = [0xB1; 32];
pub const LAST_VALID_BLOCK_HEIGHT: u64 = 5_000;

#[derive(Default)]
pub struct TestLedger {
    accounts: HashMap<[u8; 32], AccountInfo>,
    mints: HashMap<[u8; 32], u8>,
    offline: bool,
    queries: AtomicUsize,
}

impl TestLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// A ledger where every query fails, as when the RPC node is unreachable.
    pub fn offline() -> Self {
        Self {
            offline: true,
            ..Self::default()
        }
    }

    pub fn with_lamports(mut self, owner: [u8; 32], lamports: u64) -> Self {
        self.accounts.insert(
            owner,
            AccountInfo {
                lamports,
                owner: [0u8; 32],
                data_len: 0,
            },
        );
        self
    }

    /// Register an existing SPL token account (165 bytes of data).
    pub fn with_token_account(mut self, address: [u8; 32]) -> Self {
        self.accounts.insert(
            address,
            AccountInfo {
                lamports: 2_039_280,
                owner: chain_sol::TOKEN_PROGRAM_ID,
                data_len: 165,
            },
        );
        self
    }

    pub fn with_mint(mut self, mint: [u8; 32], decimals: u8) -> Self {
        self.mints.insert(mint, decimals);
        self
    }

    pub fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    fn record(&self, op: &str) -> Result<(), LedgerError> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        if self.offline {
            return Err(LedgerError::new(format!("{op}: connection refused")));
        }
        Ok(())
    }
}

impl LedgerQuery for TestLedger {
    async fn get_account_info(
        &self,
        address: &[u8; 32],
    ) -> Result<Option<AccountInfo>, LedgerError> {
        self.record("getAccountInfo")?;
        Ok(self.accounts.get(address).cloned())
    }

    async fn get_latest_blockhash(&self) -> Result<LatestBlockhash, LedgerError> {
        self.record("getLatestBlockhash")?;
        Ok(LatestBlockhash {
            blockhash: BLOCKHASH,
            last_valid_block_height: LAST_VALID_BLOCK_HEIGHT,
        })
    }

    async fn get_mint_info(&self, mint: &[u8; 32]) -> Result<MintInfo, LedgerError> {
        self.record("getMintInfo")?;
        self.mints
            .get(mint)
            .map(|&decimals| MintInfo { decimals })
            .ok_or_else(|| LedgerError::new("could not find mint"))
    }
}
