use anchor_lang::prelude::*;

#[event]
pub struct SettlementCompleted {
    pub id: [u8; 32],
    pub sender: Pubkey,
    pub recipient: Pubkey,
    pub amount: u64,
    pub fee: u64,
    pub resource_tag: [u8; 32],
}

#[event]
pub struct TrustAttested {
    pub target: Pubkey,
    pub trust_score: u8,
    pub max_amount: u64,
    pub valid_until: i64,
    pub attestor: Pubkey,
    pub check_hash: [u8; 32],
}

#[event]
pub struct AgentRegistered {
    pub owner: Pubkey,
    pub name: String,
    pub version: String,
    pub daily_limit: u64,
    pub caps_hash: [u8; 32],
}

#[event]
pub struct AgentLimitsUpdated {
    pub owner: Pubkey,
    pub max_transaction: u64,
    pub daily_limit: u64,
}

#[event]
pub struct ProtocolFeeUpdated {
    pub old_bps: u16,
    pub new_bps: u16,
}

#[event]
pub struct PauseToggled {
    pub paused: bool,
    pub by: Pubkey,
}

#[event]
pub struct FeeSinkUpdated {
    pub old: Pubkey,
    pub new: Pubkey,
}

#[event]
pub struct RoleUpdated {
    pub identity: Pubkey,
    pub capabilities: u8,
}

#[event]
pub struct EscrowFunded {
    pub sender: Pubkey,
    pub amount: u64,
}

#[event]
pub struct EscrowReclaimed {
    pub sender: Pubkey,
    pub amount: u64,
}

#[event]
pub struct DenominationToggled {
    pub denomination: u64,
    pub active: bool,
    pub by: Pubkey,
}

#[event]
pub struct Deposited {
    pub commitment: [u8; 32],
    pub leaf_index: u32,
    pub root: [u8; 32],
    pub denomination: u64,
    pub timestamp: i64,
}

#[event]
pub struct Withdrawn {
    pub nullifier: [u8; 32],
    pub recipient: Pubkey,
    pub relayer: Pubkey,
    pub fee: u64,
    pub denomination: u64,
}
