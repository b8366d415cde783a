//! Single entry point for direct (on-chain) donation builds.

use crate::config::PolicyConfig;
use crate::error::{network_fault, DonationError};
use crate::ledger::LedgerQuery;
use crate::native::{build_native_transfer, parse_recipient};
use crate::policy;
use crate::registry::{CharityMode, CharityRecord};
use crate::token::build_token_transfer;
use crate::transaction::UnsignedDonationTransaction;
use crate::types::AssetSpecifier;

/// Build an unsigned donation to a direct-mode charity.
///
/// Native donations must fit within the payer's balance minus the fee
/// buffer (`fee_buffer`, else the configured default). Token donations are
/// not checked against the native balance; covering their fees is the
/// caller's job.
pub async fn build_donation_transaction<L: LedgerQuery>(
    ledger: &L,
    payer: &[u8; 32],
    record: &CharityRecord,
    asset: &AssetSpecifier,
    amount: f64,
    fee_buffer: Option<f64>,
    config: &PolicyConfig,
) -> Result<UnsignedDonationTransaction, DonationError> {
    if record.mode != CharityMode::Direct {
        tracing::warn!(charity_id = %record.id, "direct build attempted for external charity");
        return Err(DonationError::ModeMismatch(record.id.clone()));
    }
    let recipient = record.recipient_address()?;

    match asset {
        AssetSpecifier::Native => {
            policy::check_amount(amount, asset, config)?;
            parse_recipient(recipient)?;

            let balance = ledger
                .get_account_info(payer)
                .await
                .map_err(network_fault("getAccountInfo"))?
                .map_or(0, |account| account.lamports);
            let buffer = fee_buffer.unwrap_or(config.fee_buffer);
            policy::ensure_within_balance(amount, policy::spendable_lamports(balance, buffer))?;

            let blockhash = ledger
                .get_latest_blockhash()
                .await
                .map_err(network_fault("getLatestBlockhash"))?;
            build_native_transfer(payer, recipient, amount, blockhash, config)
        }
        AssetSpecifier::Token(token) => {
            build_token_transfer(ledger, payer, recipient, token, amount, config).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::memory::MemoryLedger;
    use crate::policy::LAMPORTS_PER_SOL;
    use crate::registry::CharityRegistry;

    const PAYER: [u8; 32] = [0x42; 32];

    fn rfus() -> &'static CharityRecord {
        CharityRegistry::builtin().lookup("rfus").unwrap()
    }

    #[tokio::test]
    async fn external_record_is_refused() {
        let ledger = MemoryLedger::default();
        let stc = CharityRegistry::builtin().lookup("stc").unwrap();
        let err = build_donation_transaction(
            &ledger,
            &PAYER,
            stc,
            &AssetSpecifier::Native,
            0.01,
            None,
            &PolicyConfig::default(),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, DonationError::ModeMismatch(_)));
        assert_eq!(ledger.call_count(), 0);
    }

    #[tokio::test]
    async fn direct_record_without_address_is_refused() {
        let mut record = rfus().clone();
        record.address = None;
        let ledger = MemoryLedger::default();
        let err = build_donation_transaction(
            &ledger,
            &PAYER,
            &record,
            &AssetSpecifier::Native,
            0.01,
            None,
            &PolicyConfig::default(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, DonationError::MissingRecipientAddress(_)));
    }

    #[tokio::test]
    async fn native_within_spendable_balance() {
        let ledger = MemoryLedger::default().with_account(PAYER, LAMPORTS_PER_SOL);
        let tx = build_donation_transaction(
            &ledger,
            &PAYER,
            rfus(),
            &AssetSpecifier::Native,
            0.01,
            None,
            &PolicyConfig::default(),
        )
        .await
        .unwrap();
        assert_eq!(tx.instructions().len(), 1);
    }

    #[tokio::test]
    async fn native_over_spendable_balance_is_rejected() {
        let ledger = MemoryLedger::default().with_account(PAYER, LAMPORTS_PER_SOL);
        let err = build_donation_transaction(
            &ledger,
            &PAYER,
            rfus(),
            &AssetSpecifier::Native,
            0.999,
            None,
            &PolicyConfig::default(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, DonationError::ExceedsAvailableBalance { .. }));
    }

    #[tokio::test]
    async fn fee_buffer_override_applies() {
        let ledger = MemoryLedger::default().with_account(PAYER, LAMPORTS_PER_SOL);
        let result = build_donation_transaction(
            &ledger,
            &PAYER,
            rfus(),
            &AssetSpecifier::Native,
            0.999,
            Some(0.0),
            &PolicyConfig::default(),
        )
        .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn amount_equal_to_spendable_balance_is_accepted() {
        let ledger = MemoryLedger::default().with_account(PAYER, 300_000_000);
        let tx = build_donation_transaction(
            &ledger,
            &PAYER,
            rfus(),
            &AssetSpecifier::Native,
            0.2,
            Some(0.1),
            &PolicyConfig::default(),
        )
        .await
        .unwrap();

        let lamports = u64::from_le_bytes(tx.instructions()[0].data[4..12].try_into().unwrap());
        assert_eq!(lamports, 200_000_000);
    }

    #[tokio::test]
    async fn one_lamport_over_spendable_is_rejected() {
        let ledger = MemoryLedger::default().with_account(PAYER, 299_999_999);
        let err = build_donation_transaction(
            &ledger,
            &PAYER,
            rfus(),
            &AssetSpecifier::Native,
            0.2,
            Some(0.1),
            &PolicyConfig::default(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, DonationError::ExceedsAvailableBalance { available, .. } if available == 0.199_999_999));
    }

    #[tokio::test]
    async fn missing_payer_account_counts_as_empty() {
        let ledger = MemoryLedger::default();
        let err = build_donation_transaction(
            &ledger,
            &PAYER,
            rfus(),
            &AssetSpecifier::Native,
            0.01,
            None,
            &PolicyConfig::default(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, DonationError::ExceedsAvailableBalance { available, .. } if available == 0.0));
    }

    #[tokio::test]
    async fn token_donations_ignore_native_balance() {
        let ledger = MemoryLedger::default();
        let tx = build_donation_transaction(
            &ledger,
            &PAYER,
            rfus(),
            &AssetSpecifier::usdc(),
            5.0,
            None,
            &PolicyConfig::default(),
        )
        .await
        .unwrap();
        assert_eq!(tx.instructions().len(), 2);
    }
}
