use anchor_lang::prelude::*;

pub mod constants;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod proof;
pub mod signature;
pub mod state;
pub mod utils;

use instructions::*;
use state::{PayCheck, PaymentAuthorization};

declare_id!("3Daewpn3JCjymAd65qzjMsBFiLS9E3zHWoQ7uxiEkDfw");

#[program]
pub mod snowrail {
    use super::*;

    /// Create the settlement config and give the caller every role.
    /// `fee_bps` defaults to 50 (0.5%).
    pub fn initialize(
        ctx: Context<Initialize>,
        fee_sink: Pubkey,
        fee_bps: Option<u16>,
        domain_salt: [u8; 32],
    ) -> Result<()> {
        instructions::initialize::handler(ctx, fee_sink, fee_bps, domain_salt)
    }

    /// Create the anonymity pool with its three denomination tiers
    /// (0.1 / 1 / 10 SOL when omitted)
    pub fn initialize_pool(
        ctx: Context<InitializePool>,
        denominations: Option<[u64; 3]>,
    ) -> Result<()> {
        instructions::initialize_pool::handler(ctx, denominations)
    }

    /// Change the protocol fee; capped at 500 bps
    pub fn set_protocol_fee(ctx: Context<SetProtocolFee>, bps: u16) -> Result<()> {
        instructions::set_protocol_fee::handler(ctx, bps)
    }

    /// Halt payments and bridging. Pool withdrawals are unaffected.
    pub fn pause(ctx: Context<SetPause>) -> Result<()> {
        instructions::set_pause::handler(ctx, true)
    }

    /// Lift a pause
    pub fn unpause(ctx: Context<SetPause>) -> Result<()> {
        instructions::set_pause::handler(ctx, false)
    }

    /// Redirect future protocol fees
    pub fn set_fee_sink(ctx: Context<SetFeeSink>, fee_sink: Pubkey) -> Result<()> {
        instructions::set_fee_sink::handler(ctx, fee_sink)
    }

    /// Add capability bits to `identity`'s role record
    pub fn grant_role(ctx: Context<ManageRole>, identity: Pubkey, capabilities: u8) -> Result<()> {
        instructions::manage_role::handler(ctx, identity, capabilities, true)
    }

    /// Clear capability bits from `identity`'s role record
    pub fn revoke_role(ctx: Context<ManageRole>, identity: Pubkey, capabilities: u8) -> Result<()> {
        instructions::manage_role::handler(ctx, identity, capabilities, false)
    }

    /// Open or close one pool tier. Closed tiers still honour withdrawals.
    pub fn set_denomination_active(
        ctx: Context<SetDenominationActive>,
        denomination: u64,
        active: bool,
    ) -> Result<()> {
        instructions::set_denomination_active::handler(ctx, denomination, active)
    }

    /// Store (or overwrite) the trust attestation for `target`
    pub fn record_trust_attestation(
        ctx: Context<RecordTrustAttestation>,
        target: Pubkey,
        trust_score: u8,
        max_amount: u64,
        valid_until: i64,
        check_hash: [u8; 32],
    ) -> Result<()> {
        instructions::record_trust_attestation::handler(
            ctx,
            target,
            trust_score,
            max_amount,
            valid_until,
            check_hash,
        )
    }

    /// Advisory trust query; never mutates state
    pub fn can_pay(ctx: Context<CanPay>, target: Pubkey, amount: u64) -> Result<PayCheck> {
        instructions::can_pay::handler(ctx, target, amount)
    }

    /// Open (or re-register) the caller's agent budget
    pub fn register_agent(
        ctx: Context<RegisterAgent>,
        name: String,
        version: String,
        daily_limit: u64,
        caps_hash: [u8; 32],
    ) -> Result<()> {
        instructions::register_agent::handler(ctx, name, version, daily_limit, caps_hash)
    }

    /// Operator override of an agent's per-transaction and daily caps
    pub fn set_agent_limits(
        ctx: Context<SetAgentLimits>,
        owner: Pubkey,
        max_transaction: u64,
        daily_limit: u64,
    ) -> Result<()> {
        instructions::set_agent_limits::handler(ctx, owner, max_transaction, daily_limit)
    }

    /// Top up the escrow that relayed payments draw from
    pub fn fund_escrow(ctx: Context<FundEscrow>, amount: u64) -> Result<()> {
        instructions::fund_escrow::handler(ctx, amount)
    }

    /// Withdraw unspent escrow back to the sender
    pub fn reclaim_escrow(ctx: Context<ReclaimEscrow>, amount: u64) -> Result<()> {
        instructions::reclaim_escrow::handler(ctx, amount)
    }

    /// Direct payment signed by the sender
    pub fn pay(
        ctx: Context<Pay>,
        recipient: Pubkey,
        amount: u64,
        resource_tag: [u8; 32],
    ) -> Result<()> {
        instructions::pay::handler(ctx, recipient, amount, resource_tag)
    }

    /// Relayed payment carrying the sender's off-chain Ed25519 authorization
    pub fn execute_signed_payment(
        ctx: Context<ExecuteSignedPayment>,
        auth: PaymentAuthorization,
        signature: [u8; 64],
    ) -> Result<()> {
        instructions::execute_signed_payment::handler(ctx, auth, signature)
    }

    /// Settle straight into the pool as a fixed-denomination deposit
    pub fn bridge_to_pool(
        ctx: Context<BridgeToPool>,
        commitment: [u8; 32],
        denomination: u64,
    ) -> Result<u32> {
        instructions::bridge_to_pool::handler(ctx, commitment, denomination)
    }

    /// Insert a commitment and lock one denomination in the pool
    pub fn deposit(ctx: Context<Deposit>, commitment: [u8; 32], denomination: u64) -> Result<u32> {
        instructions::deposit::handler(ctx, commitment, denomination)
    }

    /// Spend a nullifier against a recent root and pay out the denomination
    #[allow(clippy::too_many_arguments)]
    pub fn withdraw(
        ctx: Context<Withdraw>,
        proof: Vec<u8>,
        root: [u8; 32],
        nullifier: [u8; 32],
        recipient: Pubkey,
        relayer: Pubkey,
        fee: u64,
        denomination: u64,
    ) -> Result<()> {
        instructions::withdraw::handler(
            ctx,
            proof,
            root,
            nullifier,
            recipient,
            relayer,
            fee,
            denomination,
        )
    }
}
