use anchor_lang::prelude::*;

use crate::constants::{POOL_SEED, ROLE_SEED};
use crate::events::DenominationToggled;
use crate::state::{capability, AnonymityPool};
use crate::utils::require_capability;

#[derive(Accounts)]
pub struct SetDenominationActive<'info> {
    #[account(mut, seeds = [POOL_SEED], bump)]
    pub pool: AccountLoader<'info, AnonymityPool>,

    /// CHECK: role record for `admin`; may be uninitialised.
    #[account(seeds = [ROLE_SEED, admin.key().as_ref()], bump)]
    pub admin_role: UncheckedAccount<'info>,

    pub admin: Signer<'info>,
}

pub fn handler(ctx: Context<SetDenominationActive>, denomination: u64, active: bool) -> Result<()> {
    let admin = ctx.accounts.admin.key();
    require_capability(&ctx.accounts.admin_role, &admin, capability::ADMIN)?;

    ctx.accounts.pool.load_mut()?.set_active(denomination, active)?;

    msg!("SNOWRAIL: Denomination {} active={}", denomination, active);
    emit!(DenominationToggled {
        denomination,
        active,
        by: admin,
    });

    Ok(())
}
