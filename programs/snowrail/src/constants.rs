use anchor_lang::prelude::*;

pub const SETTLEMENT_SEED: &[u8] = b"settlement";
pub const ROLE_SEED: &[u8] = b"role";
pub const SENDER_SEED: &[u8] = b"sender";
pub const ATTESTATION_SEED: &[u8] = b"attestation";
pub const AGENT_SEED: &[u8] = b"agent";
pub const POOL_SEED: &[u8] = b"pool";
pub const COMMITMENT_SEED: &[u8] = b"commitment";
pub const NULLIFIER_SEED: &[u8] = b"nullifier";

/// Basis-point denominator for fee math.
pub const BPS_DENOMINATOR: u64 = 10_000;
/// Protocol fee ceiling (5%).
pub const MAX_FEE_BPS: u16 = 500;
/// Fee applied at initialization when none is given (0.5%).
pub const DEFAULT_FEE_BPS: u16 = 50;

/// Trust scores below this block settlement outright.
pub const MIN_TRUST_SCORE_HARD: u8 = 40;
/// Trust scores below this make the advisory `can_pay` query say no.
pub const MIN_TRUST_SCORE_ADVISORY: u8 = 60;
pub const MAX_TRUST_SCORE: u8 = 100;

pub const SECONDS_PER_DAY: i64 = 86_400;

pub const MAX_AGENT_NAME_LEN: usize = 32;
pub const MAX_AGENT_VERSION_LEN: usize = 16;

/// Height of the commitment tree (capacity 2^20 leaves).
pub const MERKLE_DEPTH: usize = 20;
/// Number of recent roots a withdrawal may reference.
pub const ROOT_HISTORY_SIZE: usize = 100;
pub const DENOMINATION_COUNT: usize = 3;

/// Default tiers in lamports: 0.1, 1 and 10 SOL.
pub const DEFAULT_DENOMINATIONS: [u64; DENOMINATION_COUNT] =
    [100_000_000, 1_000_000_000, 10_000_000_000];

/// Token id meaning "native lamports" inside a signed authorization.
pub const NATIVE_TOKEN: Pubkey = Pubkey::new_from_array([0u8; 32]);
