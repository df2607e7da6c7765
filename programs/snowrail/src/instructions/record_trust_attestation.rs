use anchor_lang::prelude::*;

use crate::constants::{ATTESTATION_SEED, ROLE_SEED};
use crate::events::TrustAttested;
use crate::state::{capability, TrustAttestation};
use crate::utils::require_capability;

#[derive(Accounts)]
#[instruction(target: Pubkey)]
pub struct RecordTrustAttestation<'info> {
    #[account(
        init_if_needed,
        payer = oracle,
        space = TrustAttestation::SIZE,
        seeds = [ATTESTATION_SEED, target.as_ref()],
        bump,
    )]
    pub attestation: Account<'info, TrustAttestation>,

    /// CHECK: role record for `oracle`; may be uninitialised.
    #[account(seeds = [ROLE_SEED, oracle.key().as_ref()], bump)]
    pub oracle_role: UncheckedAccount<'info>,

    #[account(mut)]
    pub oracle: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handler(
    ctx: Context<RecordTrustAttestation>,
    target: Pubkey,
    trust_score: u8,
    max_amount: u64,
    valid_until: i64,
    check_hash: [u8; 32],
) -> Result<()> {
    let oracle = ctx.accounts.oracle.key();
    require_capability(&ctx.accounts.oracle_role, &oracle, capability::ORACLE)?;

    let clock = Clock::get()?;
    ctx.accounts.attestation.record(
        target,
        trust_score,
        max_amount,
        valid_until,
        oracle,
        check_hash,
        clock.unix_timestamp,
        ctx.bumps.attestation,
    )?;

    msg!(
        "SNOWRAIL: Trust attested: target={}, score={}, max_amount={}, valid_until={}",
        target,
        trust_score,
        max_amount,
        valid_until
    );
    emit!(TrustAttested {
        target,
        trust_score,
        max_amount,
        valid_until,
        attestor: oracle,
        check_hash,
    });

    Ok(())
}
