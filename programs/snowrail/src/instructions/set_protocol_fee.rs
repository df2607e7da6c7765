use anchor_lang::prelude::*;

use crate::constants::{ROLE_SEED, SETTLEMENT_SEED};
use crate::events::ProtocolFeeUpdated;
use crate::state::{capability, Settlement};
use crate::utils::require_capability;

#[derive(Accounts)]
pub struct SetProtocolFee<'info> {
    #[account(mut, seeds = [SETTLEMENT_SEED], bump = settlement.bump)]
    pub settlement: Account<'info, Settlement>,

    /// CHECK: role record for `admin`; may be uninitialised.
    #[account(seeds = [ROLE_SEED, admin.key().as_ref()], bump)]
    pub admin_role: UncheckedAccount<'info>,

    pub admin: Signer<'info>,
}

pub fn handler(ctx: Context<SetProtocolFee>, bps: u16) -> Result<()> {
    require_capability(&ctx.accounts.admin_role, &ctx.accounts.admin.key(), capability::ADMIN)?;

    let old_bps = ctx.accounts.settlement.set_fee_bps(bps)?;

    msg!("SNOWRAIL: Protocol fee {} -> {} bps", old_bps, bps);
    emit!(ProtocolFeeUpdated {
        old_bps,
        new_bps: bps,
    });

    Ok(())
}
