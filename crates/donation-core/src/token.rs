//! SPL token donations.
//!
//! The donation lands in the charity's associated token account (ATA) for
//! the mint. If that account does not exist yet, a `Create` instruction
//! funded by the payer is placed before the transfer. Every ledger query is
//! awaited before the instruction that depends on it is appended.

use crate::config::PolicyConfig;
use crate::error::{network_fault, DonationError};
use crate::ledger::LedgerQuery;
use crate::native::parse_recipient;
use crate::policy;
use crate::transaction::UnsignedDonationTransaction;
use crate::types::{TokenAsset, MAINNET_USDC_MINT, USDC_DECIMALS};

pub fn parse_mint(mint: &str) -> Result<[u8; 32], DonationError> {
    chain_sol::address_to_bytes(mint)
        .map_err(|e| DonationError::InvalidMint(format!("{mint}: {e}")))
}

/// Decimal precision of `mint`. Mainnet USDC is fixed at 6 and never queried.
pub async fn resolve_decimals<L: LedgerQuery>(
    ledger: &L,
    mint: &[u8; 32],
) -> Result<u8, DonationError> {
    if chain_sol::bytes_to_address(mint) == MAINNET_USDC_MINT {
        return Ok(USDC_DECIMALS);
    }
    let info = ledger
        .get_mint_info(mint)
        .await
        .map_err(network_fault("getMintInfo"))?;
    Ok(info.decimals)
}

/// Build a `TransferChecked` of `round(amount * 10^decimals)` base units
/// from the payer's ATA to the recipient owner's ATA.
pub async fn build_token_transfer<L: LedgerQuery>(
    ledger: &L,
    payer: &[u8; 32],
    recipient_owner: &str,
    token: &TokenAsset,
    amount: f64,
    config: &PolicyConfig,
) -> Result<UnsignedDonationTransaction, DonationError> {
    // Everything checkable offline is checked before the first query.
    let minimum = policy::token_minimum(token, config);
    policy::check_minimum(amount, minimum)?;
    let mint = parse_mint(&token.mint)?;
    let owner = parse_recipient(recipient_owner)?;

    let decimals = resolve_decimals(ledger, &mint).await?;
    let base_units = policy::to_base_units(amount, decimals)?;
    if base_units == 0 {
        return Err(DonationError::AmountTooSmall { amount, minimum });
    }

    let sender_ata = chain_sol::derive_associated_token_address(payer, &mint)?;
    let recipient_ata = chain_sol::derive_associated_token_address(&owner, &mint)?;

    let recipient_exists = ledger
        .get_account_info(&recipient_ata)
        .await
        .map_err(network_fault("getAccountInfo"))?
        .is_some();

    let mut instructions = Vec::with_capacity(2);
    if !recipient_exists {
        tracing::debug!(
            recipient_ata = %chain_sol::bytes_to_address(&recipient_ata),
            "recipient token account missing, prepending create"
        );
        instructions.push(chain_sol::create_associated_token_account_instruction(
            payer,
            &recipient_ata,
            &owner,
            &mint,
        ));
    }
    instructions.push(chain_sol::transfer_checked_instruction(
        &sender_ata,
        &mint,
        &recipient_ata,
        payer,
        base_units,
        decimals,
    )?);

    let blockhash = ledger
        .get_latest_blockhash()
        .await
        .map_err(network_fault("getLatestBlockhash"))?;

    tracing::debug!(
        mint = %token.mint,
        base_units,
        decimals,
        create_ata = !recipient_exists,
        "built token donation"
    );

    UnsignedDonationTransaction::new(instructions, *payer, blockhash)
}
