use anchor_lang::prelude::*;

use crate::constants::AGENT_SEED;
use crate::events::AgentRegistered;
use crate::state::AgentBudget;

#[derive(Accounts)]
pub struct RegisterAgent<'info> {
    #[account(
        init,
        payer = owner,
        space = AgentBudget::SIZE,
        seeds = [AGENT_SEED, owner.key().as_ref()],
        bump,
    )]
    pub agent_budget: Account<'info, AgentBudget>,

    #[account(mut)]
    pub owner: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handler(
    ctx: Context<RegisterAgent>,
    name: String,
    version: String,
    daily_limit: u64,
    caps_hash: [u8; 32],
) -> Result<()> {
    let clock = Clock::get()?;
    let owner = ctx.accounts.owner.key();

    ctx.accounts.agent_budget.register(
        owner,
        name.clone(),
        version.clone(),
        daily_limit,
        caps_hash,
        clock.unix_timestamp,
        ctx.bumps.agent_budget,
    )?;

    msg!(
        "SNOWRAIL: Agent {} registered as {}@{} (daily limit {})",
        owner,
        name,
        version,
        daily_limit
    );
    emit!(AgentRegistered {
        owner,
        name,
        version,
        daily_limit,
        caps_hash,
    });

    Ok(())
}
