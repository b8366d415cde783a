use chain_sol::{SolInstruction, SolTransaction};

use crate::error::DonationError;
use crate::ledger::LatestBlockhash;

/// A donation transaction ready for the wallet to sign.
///
/// Never signed or submitted here. Once the chain passes
/// `blockhash.last_valid_block_height` the transaction is stale and must be
/// rebuilt, not resubmitted.
#[derive(Debug, Clone)]
pub struct UnsignedDonationTransaction {
    instructions: Vec<SolInstruction>,
    fee_payer: [u8; 32],
    blockhash: LatestBlockhash,
    compiled: SolTransaction,
}

impl UnsignedDonationTransaction {
    /// Compile `instructions` in order with `fee_payer` at account index 0.
    pub fn new(
        instructions: Vec<SolInstruction>,
        fee_payer: [u8; 32],
        blockhash: LatestBlockhash,
    ) -> Result<Self, DonationError> {
        let compiled =
            chain_sol::compile_transaction(&instructions, &fee_payer, &blockhash.blockhash)?;
        Ok(Self {
            instructions,
            fee_payer,
            blockhash,
            compiled,
        })
    }

    pub fn instructions(&self) -> &[SolInstruction] {
        &self.instructions
    }

    pub fn fee_payer(&self) -> &[u8; 32] {
        &self.fee_payer
    }

    pub fn blockhash(&self) -> &LatestBlockhash {
        &self.blockhash
    }

    pub fn compiled(&self) -> &SolTransaction {
        &self.compiled
    }

    /// The bytes each signer signs.
    pub fn message_bytes(&self) -> Result<Vec<u8>, DonationError> {
        Ok(chain_sol::serialize_message(&self.compiled)?)
    }

    /// Wire format with zeroed signature slots, for wallet `signTransaction`.
    pub fn to_unsigned_wire(&self) -> Result<Vec<u8>, DonationError> {
        Ok(chain_sol::serialize_unsigned_transaction(&self.compiled)?)
    }

    pub fn is_expired(&self, current_block_height: u64) -> bool {
        current_block_height > self.blockhash.last_valid_block_height
    }
}
