use anchor_lang::prelude::*;

#[error_code]
pub enum SnowrailError {
    // Input validation
    #[msg("Amount must be greater than zero")]
    InvalidAmount,
    #[msg("Address must not be the zero address")]
    ZeroAddress,
    #[msg("Amount is not one of the pool denominations")]
    InvalidDenomination,
    #[msg("Relayer fee exceeds the denomination")]
    InvalidFee,
    #[msg("Trust score must be between 0 and 100")]
    InvalidTrustScore,
    #[msg("Only native lamport authorizations are supported")]
    UnsupportedToken,
    #[msg("Agent name or version is too long")]
    AgentNameTooLong,

    // Authorization
    #[msg("Signature does not match the authorization sender")]
    InvalidSignature,
    #[msg("Nonce is not the next expected value for this sender")]
    InvalidNonce,
    #[msg("Authorization deadline has passed")]
    ExpiredDeadline,
    #[msg("Caller lacks the required capability")]
    Unauthorized,

    // Policy
    #[msg("Recipient trust score is below the minimum")]
    InsufficientTrust,
    #[msg("Agent daily limit exceeded")]
    DailyLimitExceeded,
    #[msg("Agent per-transaction limit exceeded")]
    TransactionLimitExceeded,
    #[msg("Agent is not registered")]
    AgentNotRegistered,
    #[msg("Protocol fee exceeds the ceiling")]
    FeeTooHigh,
    #[msg("Settlement is paused")]
    Paused,
    #[msg("Denomination pool is not active")]
    PoolNotActive,
    #[msg("Escrow balance is too low")]
    InsufficientEscrow,

    // Integrity
    #[msg("Commitment already exists")]
    CommitmentAlreadyExists,
    #[msg("Nullifier already used")]
    NullifierAlreadyUsed,
    #[msg("Merkle root is not in the recent root history")]
    InvalidMerkleRoot,
    #[msg("Proof verification failed")]
    InvalidProof,
    #[msg("Operation re-entered while in progress")]
    ReentrantCall,

    // Capacity
    #[msg("Merkle tree is full")]
    MerkleTreeFull,
    #[msg("Arithmetic overflow")]
    MathOverflow,
}
