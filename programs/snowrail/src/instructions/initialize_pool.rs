use anchor_lang::prelude::*;

use crate::constants::{DEFAULT_DENOMINATIONS, DENOMINATION_COUNT, POOL_SEED, ROLE_SEED};
use crate::state::{capability, AnonymityPool};
use crate::utils::require_capability;

#[derive(Accounts)]
pub struct InitializePool<'info> {
    #[account(
        init,
        payer = authority,
        space = AnonymityPool::SIZE,
        seeds = [POOL_SEED],
        bump,
    )]
    pub pool: AccountLoader<'info, AnonymityPool>,

    /// CHECK: role record for `authority`; may be uninitialised.
    #[account(seeds = [ROLE_SEED, authority.key().as_ref()], bump)]
    pub authority_role: UncheckedAccount<'info>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handler(
    ctx: Context<InitializePool>,
    denominations: Option<[u64; DENOMINATION_COUNT]>,
) -> Result<()> {
    let denominations = denominations.unwrap_or(DEFAULT_DENOMINATIONS);
    let authority = ctx.accounts.authority.key();
    require_capability(&ctx.accounts.authority_role, &authority, capability::ADMIN)?;

    let mut pool = ctx.accounts.pool.load_init()?;
    pool.initialize(authority, denominations, ctx.bumps.pool)?;

    msg!(
        "SNOWRAIL: Pool initialized with tiers {:?}, root {:?}",
        denominations,
        pool.tree.current_root
    );

    Ok(())
}
