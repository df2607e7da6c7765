use anchor_lang::prelude::*;

use crate::constants::{ROLE_SEED, SETTLEMENT_SEED};
use crate::events::PauseToggled;
use crate::state::{capability, Settlement};
use crate::utils::require_capability;

#[derive(Accounts)]
pub struct SetPause<'info> {
    #[account(mut, seeds = [SETTLEMENT_SEED], bump = settlement.bump)]
    pub settlement: Account<'info, Settlement>,

    /// CHECK: role record for `admin`; may be uninitialised.
    #[account(seeds = [ROLE_SEED, admin.key().as_ref()], bump)]
    pub admin_role: UncheckedAccount<'info>,

    pub admin: Signer<'info>,
}

pub fn handler(ctx: Context<SetPause>, paused: bool) -> Result<()> {
    let admin = ctx.accounts.admin.key();
    require_capability(&ctx.accounts.admin_role, &admin, capability::ADMIN)?;

    ctx.accounts.settlement.paused = paused;

    msg!("SNOWRAIL: Settlement {} by {}", if paused { "paused" } else { "unpaused" }, admin);
    emit!(PauseToggled { paused, by: admin });

    Ok(())
}
