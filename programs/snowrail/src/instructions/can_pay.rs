use anchor_lang::prelude::*;

use crate::constants::ATTESTATION_SEED;
use crate::state::{can_pay, PayCheck, TrustAttestation};
use crate::utils::read_optional;

#[derive(Accounts)]
#[instruction(target: Pubkey)]
pub struct CanPay<'info> {
    /// CHECK: attestation record for `target`; may be uninitialised.
    #[account(seeds = [ATTESTATION_SEED, target.as_ref()], bump)]
    pub attestation: UncheckedAccount<'info>,
}

/// Read-only advisory query. Never fails on policy; the answer is returned
/// to the caller as return data.
pub fn handler(ctx: Context<CanPay>, _target: Pubkey, amount: u64) -> Result<PayCheck> {
    let clock = Clock::get()?;
    let attestation = read_optional::<TrustAttestation>(&ctx.accounts.attestation)?;

    Ok(can_pay(attestation.as_ref(), amount, clock.unix_timestamp))
}
