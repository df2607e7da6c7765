use anchor_lang::prelude::*;

use crate::constants::ROLE_SEED;
use crate::errors::SnowrailError;
use crate::events::RoleUpdated;
use crate::state::{capability, RoleGrant};
use crate::utils::require_capability;

#[derive(Accounts)]
#[instruction(identity: Pubkey)]
pub struct ManageRole<'info> {
    #[account(
        init_if_needed,
        payer = admin,
        space = RoleGrant::SIZE,
        seeds = [ROLE_SEED, identity.as_ref()],
        bump,
    )]
    pub role: Account<'info, RoleGrant>,

    /// CHECK: role record for `admin`; may be uninitialised.
    #[account(seeds = [ROLE_SEED, admin.key().as_ref()], bump)]
    pub admin_role: UncheckedAccount<'info>,

    #[account(mut)]
    pub admin: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handler(
    ctx: Context<ManageRole>,
    identity: Pubkey,
    capabilities: u8,
    grant: bool,
) -> Result<()> {
    let admin = ctx.accounts.admin.key();
    require!(identity != Pubkey::default(), SnowrailError::ZeroAddress);
    // Reads the stored record, not `role`, which may alias it.
    require_capability(&ctx.accounts.admin_role, &admin, capability::ADMIN)?;

    let clock = Clock::get()?;
    let role = &mut ctx.accounts.role;
    if grant {
        role.grant(identity, capabilities, admin, clock.unix_timestamp, ctx.bumps.role);
    } else {
        role.revoke(capabilities, admin, clock.unix_timestamp);
    }

    msg!(
        "SNOWRAIL: Role for {} now {:#05b} (set by {})",
        identity,
        role.capabilities,
        admin
    );
    emit!(RoleUpdated {
        identity,
        capabilities: role.capabilities,
    });

    Ok(())
}
