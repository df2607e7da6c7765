use anchor_lang::prelude::*;

use crate::constants::{DEFAULT_FEE_BPS, ROLE_SEED, SETTLEMENT_SEED};
use crate::errors::SnowrailError;
use crate::state::{capability, RoleGrant, Settlement};

#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(
        init,
        payer = admin,
        space = Settlement::SIZE,
        seeds = [SETTLEMENT_SEED],
        bump,
    )]
    pub settlement: Account<'info, Settlement>,

    #[account(
        init,
        payer = admin,
        space = RoleGrant::SIZE,
        seeds = [ROLE_SEED, admin.key().as_ref()],
        bump,
    )]
    pub admin_role: Account<'info, RoleGrant>,

    #[account(mut)]
    pub admin: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handler(
    ctx: Context<Initialize>,
    fee_sink: Pubkey,
    fee_bps: Option<u16>,
    domain_salt: [u8; 32],
) -> Result<()> {
    require!(fee_sink != Pubkey::default(), SnowrailError::ZeroAddress);
    let fee_bps = fee_bps.unwrap_or(DEFAULT_FEE_BPS);

    let clock = Clock::get()?;
    let admin = ctx.accounts.admin.key();
    let settlement = &mut ctx.accounts.settlement;

    settlement.admin = admin;
    settlement.fee_sink = fee_sink;
    settlement.set_fee_bps(fee_bps)?;
    settlement.paused = false;
    settlement.locked = false;
    settlement.domain_salt = domain_salt;
    settlement.total_volume = 0;
    settlement.total_fees = 0;
    settlement.settlement_count = 0;
    settlement.bump = ctx.bumps.settlement;

    ctx.accounts.admin_role.grant(
        admin,
        capability::ALL,
        admin,
        clock.unix_timestamp,
        ctx.bumps.admin_role,
    );

    msg!(
        "SNOWRAIL: Settlement initialized by {} (fee {} bps, sink {})",
        admin,
        fee_bps,
        fee_sink
    );

    Ok(())
}
