//! Native SOL donations: one System Program transfer.

use crate::config::PolicyConfig;
use crate::error::DonationError;
use crate::ledger::LatestBlockhash;
use crate::policy;
use crate::transaction::UnsignedDonationTransaction;
use crate::types::AssetSpecifier;

/// Decode a recorded recipient address, mapping failures to `InvalidRecipient`.
pub fn parse_recipient(address: &str) -> Result<[u8; 32], DonationError> {
    chain_sol::address_to_bytes(address)
        .map_err(|e| DonationError::InvalidRecipient(format!("{address}: {e}")))
}

/// Build a native transfer of `floor(amount * 10^9)` lamports from `payer`
/// to `recipient`, with `payer` as fee payer.
///
/// Pure: the blockhash is supplied by the caller and nothing touches the
/// network.
pub fn build_native_transfer(
    payer: &[u8; 32],
    recipient: &str,
    amount: f64,
    blockhash: LatestBlockhash,
    config: &PolicyConfig,
) -> Result<UnsignedDonationTransaction, DonationError> {
    policy::check_amount(amount, &AssetSpecifier::Native, config)?;
    let to = parse_recipient(recipient)?;

    let lamports = policy::to_lamports(amount)?;
    if lamports == 0 {
        return Err(DonationError::AmountTooSmall {
            amount,
            minimum: config.native_minimum,
        });
    }

    tracing::debug!(recipient, lamports, "building native donation");

    let ix = chain_sol::system_transfer_instruction(payer, &to, lamports)?;
    UnsignedDonationTransaction::new(vec![ix], *payer, blockhash)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RFUS: &str = "8r2EpKVHLf1ASuDtj2up8TDwjkTbHbDY94UcT7jcEQ1s";

    fn blockhash() -> LatestBlockhash {
        LatestBlockhash {
            blockhash: [0xCC; 32],
            last_valid_block_height: 42,
        }
    }

    #[test]
    fn single_transfer_instruction() {
        let payer = [0x11u8; 32];
        let tx = build_native_transfer(&payer, RFUS, 0.01, blockhash(), &PolicyConfig::default())
            .unwrap();

        assert_eq!(tx.instructions().len(), 1);
        let ix = &tx.instructions()[0];
        assert_eq!(ix.program_id, chain_sol::SYSTEM_PROGRAM_ID);
        assert_eq!(ix.accounts[0].pubkey, payer);
        assert_eq!(ix.accounts[1].pubkey, parse_recipient(RFUS).unwrap());
        assert_eq!(&ix.data[4..], &10_000_000u64.to_le_bytes());

        assert_eq!(tx.fee_payer(), &payer);
        assert_eq!(tx.blockhash().blockhash, [0xCC; 32]);
    }

    #[test]
    fn lamports_are_floored() {
        let tx = build_native_transfer(
            &[1u8; 32],
            RFUS,
            0.000_001_999_9,
            blockhash(),
            &PolicyConfig::default(),
        )
        .unwrap();
        assert_eq!(&tx.instructions()[0].data[4..], &1_999u64.to_le_bytes());
    }

    #[test]
    fn invalid_recipient_is_rejected() {
        let err = build_native_transfer(&[1u8; 32], "0xdeadbeef", 0.01, blockhash(), &PolicyConfig::default())
            .unwrap_err();
        assert!(matches!(err, DonationError::InvalidRecipient(_)));
    }

    #[test]
    fn negative_amount_is_rejected_before_recipient() {
        let err = build_native_transfer(&[1u8; 32], "bad", -1.0, blockhash(), &PolicyConfig::default())
            .unwrap_err();
        assert!(matches!(err, DonationError::InvalidAmount));
    }

    #[test]
    fn dust_is_rejected() {
        let err = build_native_transfer(&[1u8; 32], RFUS, 1e-9, blockhash(), &PolicyConfig::default())
            .unwrap_err();
        assert!(matches!(err, DonationError::AmountTooSmall { .. }));
    }
}
