//! Ed25519 signature checks through the native precompile.
//!
//! The transaction carries an Ed25519 program instruction ahead of ours; the
//! runtime verifies it before execution, and we confirm through the
//! instructions sysvar that it covers exactly the expected key, message and
//! signature.

use anchor_lang::prelude::*;
use solana_program::ed25519_program;
use solana_program::sysvar::instructions::{load_current_index_checked, load_instruction_at_checked};

use crate::errors::SnowrailError;

/// Byte offset of the first Ed25519SignatureOffsets entry.
const SIGNATURE_OFFSETS_START: usize = 2;
/// Size of one Ed25519SignatureOffsets entry.
const SIGNATURE_OFFSETS_SIZE: usize = 14;
/// Instruction index meaning "data lives in this same instruction".
const INLINE: u16 = u16::MAX;

fn read_u16(data: &[u8], at: usize) -> Option<u16> {
    let bytes = data.get(at..at + 2)?;
    Some(u16::from_le_bytes([bytes[0], bytes[1]]))
}

fn slice_at(data: &[u8], offset: u16, len: usize) -> Option<&[u8]> {
    let start = offset as usize;
    data.get(start..start.checked_add(len)?)
}

/// Whether an Ed25519 program instruction's data verifies `signature` by
/// `pubkey` over `message`, with every field inline.
pub fn ed25519_instruction_matches(
    data: &[u8],
    pubkey: &[u8; 32],
    message: &[u8],
    signature: &[u8; 64],
) -> bool {
    if data.len() < SIGNATURE_OFFSETS_START + SIGNATURE_OFFSETS_SIZE || data[0] != 1 {
        return false;
    }

    let o = SIGNATURE_OFFSETS_START;
    let (
        Some(sig_offset),
        Some(sig_ix),
        Some(pk_offset),
        Some(pk_ix),
        Some(msg_offset),
        Some(msg_size),
        Some(msg_ix),
    ) = (
        read_u16(data, o),
        read_u16(data, o + 2),
        read_u16(data, o + 4),
        read_u16(data, o + 6),
        read_u16(data, o + 8),
        read_u16(data, o + 10),
        read_u16(data, o + 12),
    ) else {
        return false;
    };

    // A non-inline index would let the precompile check bytes from another
    // instruction than the ones compared here.
    if sig_ix != INLINE || pk_ix != INLINE || msg_ix != INLINE {
        return false;
    }
    if msg_size as usize != message.len() {
        return false;
    }

    slice_at(data, sig_offset, 64) == Some(&signature[..])
        && slice_at(data, pk_offset, 32) == Some(&pubkey[..])
        && slice_at(data, msg_offset, message.len()) == Some(message)
}

/// Require an earlier Ed25519 program instruction in this transaction that
/// verifies `signature` by `signer` over `message`.
pub fn verify_ed25519_signature(
    instructions: &AccountInfo,
    signer: &Pubkey,
    message: &[u8],
    signature: &[u8; 64],
) -> Result<()> {
    let current = load_current_index_checked(instructions)
        .map_err(|_| error!(SnowrailError::InvalidSignature))?;

    let found = (0..current).any(|idx| {
        load_instruction_at_checked(idx as usize, instructions)
            .map(|ix| {
                ix.program_id == ed25519_program::ID
                    && ed25519_instruction_matches(&ix.data, &signer.to_bytes(), message, signature)
            })
            .unwrap_or(false)
    });

    require!(found, SnowrailError::InvalidSignature);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATA_START: usize = SIGNATURE_OFFSETS_START + SIGNATURE_OFFSETS_SIZE;

    /// Same layout the Ed25519 program's instruction builder produces:
    /// header, then pubkey, signature, message.
    fn build(pubkey: &[u8; 32], signature: &[u8; 64], message: &[u8], ix_index: u16) -> Vec<u8> {
        let pk_offset = DATA_START as u16;
        let sig_offset = pk_offset + 32;
        let msg_offset = sig_offset + 64;

        let mut data = vec![1u8, 0u8];
        for field in [
            sig_offset,
            ix_index,
            pk_offset,
            ix_index,
            msg_offset,
            message.len() as u16,
            ix_index,
        ] {
            data.extend_from_slice(&field.to_le_bytes());
        }
        data.extend_from_slice(pubkey);
        data.extend_from_slice(signature);
        data.extend_from_slice(message);
        data
    }

    #[test]
    fn test_matching_inline_entry() {
        let pk = [7u8; 32];
        let sig = [9u8; 64];
        let msg = [1u8; 32];
        let data = build(&pk, &sig, &msg, INLINE);

        assert!(ed25519_instruction_matches(&data, &pk, &msg, &sig));
    }

    #[test]
    fn test_wrong_signer_or_message() {
        let pk = [7u8; 32];
        let sig = [9u8; 64];
        let msg = [1u8; 32];
        let data = build(&pk, &sig, &msg, INLINE);

        assert!(!ed25519_instruction_matches(&data, &[8u8; 32], &msg, &sig));
        assert!(!ed25519_instruction_matches(&data, &pk, &[2u8; 32], &sig));
        assert!(!ed25519_instruction_matches(&data, &pk, &msg, &[0u8; 64]));
        assert!(!ed25519_instruction_matches(&data, &pk, &msg[..31], &sig));
    }

    #[test]
    fn test_rejects_cross_instruction_references() {
        let pk = [7u8; 32];
        let sig = [9u8; 64];
        let msg = [1u8; 32];
        let data = build(&pk, &sig, &msg, 0);

        assert!(!ed25519_instruction_matches(&data, &pk, &msg, &sig));
    }

    #[test]
    fn test_truncated_data() {
        let pk = [7u8; 32];
        let sig = [9u8; 64];
        let msg = [1u8; 32];
        let data = build(&pk, &sig, &msg, INLINE);

        assert!(!ed25519_instruction_matches(&data[..DATA_START], &pk, &msg, &sig));
        assert!(!ed25519_instruction_matches(&data[..data.len() - 1], &pk, &msg, &sig));
        assert!(!ed25519_instruction_matches(&[], &pk, &msg, &sig));
    }
}
