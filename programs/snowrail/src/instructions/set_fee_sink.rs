use anchor_lang::prelude::*;

use crate::constants::{ROLE_SEED, SETTLEMENT_SEED};
use crate::errors::SnowrailError;
use crate::events::FeeSinkUpdated;
use crate::state::{capability, Settlement};
use crate::utils::require_capability;

#[derive(Accounts)]
pub struct SetFeeSink<'info> {
    #[account(mut, seeds = [SETTLEMENT_SEED], bump = settlement.bump)]
    pub settlement: Account<'info, Settlement>,

    /// CHECK: role record for `admin`; may be uninitialised.
    #[account(seeds = [ROLE_SEED, admin.key().as_ref()], bump)]
    pub admin_role: UncheckedAccount<'info>,

    pub admin: Signer<'info>,
}

pub fn handler(ctx: Context<SetFeeSink>, fee_sink: Pubkey) -> Result<()> {
    require_capability(&ctx.accounts.admin_role, &ctx.accounts.admin.key(), capability::ADMIN)?;
    require!(fee_sink != Pubkey::default(), SnowrailError::ZeroAddress);

    let old = std::mem::replace(&mut ctx.accounts.settlement.fee_sink, fee_sink);

    msg!("SNOWRAIL: Fee sink set to {}", fee_sink);
    emit!(FeeSinkUpdated { old, new: fee_sink });

    Ok(())
}
