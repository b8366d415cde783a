//! SPL Token instructions and associated token account derivation.
//!
//! Implements `TransferChecked`, the associated token account (ATA) `Create`
//! instruction and ATA address derivation without the `spl-token` or
//! `spl-associated-token-account` crates.

use sha2::{Digest, Sha256};

use crate::error::SolError;
use crate::transaction::{SolAccountMeta, SolInstruction, SYSTEM_PROGRAM_ID};

// ---------------------------------------------------------------------------
// Well-known program IDs
// ---------------------------------------------------------------------------

/// SPL Token Program ID: `TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA`
pub const TOKEN_PROGRAM_ID: [u8; 32] = [
    0x06, 0xdd, 0xf6, 0xe1, 0xd7, 0x65, 0xa1, 0x93, 0xd9, 0xcb, 0xe1, 0x46, 0xce, 0xeb, 0x79,
    0xac, 0x1c, 0xb4, 0x85, 0xed, 0x5f, 0x5b, 0x37, 0x91, 0x3a, 0x8c, 0xf5, 0x85, 0x7e, 0xff,
    0x00, 0xa9,
];

/// Associated Token Account Program ID: `ATokenGPvbdGVxr1b2hvZbsiqW5xWH25efTNsLJA8knL`
pub const ASSOCIATED_TOKEN_PROGRAM_ID: [u8; 32] = [
    0x8c, 0x97, 0x25, 0x8f, 0x4e, 0x24, 0x89, 0xf1, 0xbb, 0x3d, 0x10, 0x29, 0x14, 0x8e, 0x0d,
    0x83, 0x0b, 0x5a, 0x13, 0x99, 0xda, 0xff, 0x10, 0x84, 0x04, 0x8e, 0x7b, 0xd8, 0xdb, 0xe9,
    0xf8, 0x59,
];

/// SPL Token `TransferChecked` instruction discriminator.
const TRANSFER_CHECKED_IX: u8 = 12;

const PDA_MARKER: &[u8] = b"ProgramDerivedAddress";

// ---------------------------------------------------------------------------
// Instructions
// ---------------------------------------------------------------------------

/// Build an SPL Token `TransferChecked` instruction.
///
/// The token program compares `decimals` against the mint and rejects the
/// transfer on mismatch, so a client with a stale decimal count cannot move
/// 1000x the intended amount.
///
/// # Wire format
///
/// `[12]` + u64 LE amount + u8 decimals = 10 bytes. Accounts: source
/// (writable), mint, destination (writable), owner (signer).
pub fn transfer_checked_instruction(
    source_token_account: &[u8; 32],
    mint: &[u8; 32],
    destination_token_account: &[u8; 32],
    owner: &[u8; 32],
    amount: u64,
    decimals: u8,
) -> Result<SolInstruction, SolError> {
    if amount == 0 {
        return Err(SolError::InstructionBuildError(
            "SPL transfer amount must be > 0".into(),
        ));
    }

    let mut data = Vec::with_capacity(10);
    data.push(TRANSFER_CHECKED_IX);
    data.extend_from_slice(&amount.to_le_bytes());
    data.push(decimals);

    Ok(SolInstruction {
        program_id: TOKEN_PROGRAM_ID,
        accounts: vec![
            SolAccountMeta::writable(*source_token_account, false),
            SolAccountMeta::readonly(*mint, false),
            SolAccountMeta::writable(*destination_token_account, false),
            SolAccountMeta::readonly(*owner, true),
        ],
        data,
    })
}

/// Build an associated token account `Create` instruction.
///
/// `payer` funds the rent-exempt balance of the new account. Instruction data
/// is empty (the legacy, non-idempotent `Create`), so the instruction fails on
/// chain if the account already exists.
pub fn create_associated_token_account_instruction(
    payer: &[u8; 32],
    associated_account: &[u8; 32],
    owner: &[u8; 32],
    mint: &[u8; 32],
) -> SolInstruction {
    SolInstruction {
        program_id: ASSOCIATED_TOKEN_PROGRAM_ID,
        accounts: vec![
            SolAccountMeta::writable(*payer, true),
            SolAccountMeta::writable(*associated_account, false),
            SolAccountMeta::readonly(*owner, false),
            SolAccountMeta::readonly(*mint, false),
            SolAccountMeta::readonly(SYSTEM_PROGRAM_ID, false),
            SolAccountMeta::readonly(TOKEN_PROGRAM_ID, false),
        ],
        data: Vec::new(),
    }
}

// ---------------------------------------------------------------------------
// Associated Token Account (PDA) derivation
// ---------------------------------------------------------------------------

/// Derive the associated token account address for a wallet + mint pair.
///
/// The ATA is a Program Derived Address with seeds
/// `[wallet, token_program_id, mint]` under the ATA program.
pub fn derive_associated_token_address(
    wallet: &[u8; 32],
    mint: &[u8; 32],
) -> Result<[u8; 32], SolError> {
    find_program_address(
        &[wallet.as_ref(), &TOKEN_PROGRAM_ID, mint.as_ref()],
        &ASSOCIATED_TOKEN_PROGRAM_ID,
    )
    .map(|(address, _bump)| address)
}

/// Find a Program Derived Address for the given seeds and program.
///
/// Bump seeds are tried from 255 down to 0; the first
/// `SHA-256(seeds || bump || program_id || "ProgramDerivedAddress")` that is
/// NOT a valid Ed25519 point wins.
pub fn find_program_address(
    seeds: &[&[u8]],
    program_id: &[u8; 32],
) -> Result<([u8; 32], u8), SolError> {
    for bump in (0u8..=255).rev() {
        if let Some(address) = try_create_program_address(seeds, &[bump], program_id) {
            return Ok((address, bump));
        }
    }

    Err(SolError::InvalidAddress(
        "could not find valid PDA bump seed".into(),
    ))
}

fn try_create_program_address(
    seeds: &[&[u8]],
    bump_seed: &[u8],
    program_id: &[u8; 32],
) -> Option<[u8; 32]> {
    let mut hasher = Sha256::new();

    for seed in seeds {
        hasher.update(seed);
    }
    hasher.update(bump_seed);
    hasher.update(program_id);
    hasher.update(PDA_MARKER);

    let hash: [u8; 32] = hasher.finalize().into();

    if is_on_curve(&hash) {
        return None;
    }

    Some(hash)
}

/// Whether 32 bytes decompress to an Ed25519 curve point.
pub fn is_on_curve(bytes: &[u8; 32]) -> bool {
    curve25519_dalek::edwards::CompressedEdwardsY(*bytes)
        .decompress()
        .is_some()
}
