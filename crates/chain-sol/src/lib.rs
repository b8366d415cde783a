//! Solana wire primitives for the donation builders.
//!
//! This crate handles address encoding, System Program and SPL Token
//! instructions, associated token account derivation, and the legacy
//! transaction wire format, all without pulling in `solana-sdk` (which drags
//! in tokio and 200+ transitive dependencies).
//!
//! Nothing here signs. Transactions leave this crate unsigned and are
//! signed by the wallet that owns the payer key.

pub mod address;
pub mod error;
pub mod spl_token;
pub mod transaction;

pub use address::{address_to_bytes, bytes_to_address, validate_address};
pub use error::SolError;
pub use spl_token::{
    create_associated_token_account_instruction, derive_associated_token_address,
    find_program_address, is_on_curve, transfer_checked_instruction, ASSOCIATED_TOKEN_PROGRAM_ID,
    TOKEN_PROGRAM_ID,
};
pub use transaction::{
    compile_transaction, encode_compact_u16, serialize_message, serialize_unsigned_transaction,
    system_transfer_instruction, CompiledInstruction, SolAccountMeta, SolInstruction,
    SolTransaction, SIGNATURE_LEN, SYSTEM_PROGRAM_ID,
};
