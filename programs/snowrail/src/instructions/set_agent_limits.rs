use anchor_lang::prelude::*;

use crate::constants::{AGENT_SEED, ROLE_SEED};
use crate::errors::SnowrailError;
use crate::events::AgentLimitsUpdated;
use crate::state::{capability, AgentBudget};
use crate::utils::{read_optional, require_capability, write_account};

#[derive(Accounts)]
#[instruction(owner: Pubkey)]
pub struct SetAgentLimits<'info> {
    /// CHECK: budget record for `owner`; may be uninitialised.
    #[account(mut, seeds = [AGENT_SEED, owner.as_ref()], bump)]
    pub agent_budget: UncheckedAccount<'info>,

    /// CHECK: role record for `operator`; may be uninitialised.
    #[account(seeds = [ROLE_SEED, operator.key().as_ref()], bump)]
    pub operator_role: UncheckedAccount<'info>,

    pub operator: Signer<'info>,
}

pub fn handler(
    ctx: Context<SetAgentLimits>,
    owner: Pubkey,
    max_transaction: u64,
    daily_limit: u64,
) -> Result<()> {
    require_capability(
        &ctx.accounts.operator_role,
        &ctx.accounts.operator.key(),
        capability::OPERATOR,
    )?;

    let mut budget = read_optional::<AgentBudget>(&ctx.accounts.agent_budget)?
        .ok_or(SnowrailError::AgentNotRegistered)?;
    budget.set_limits(max_transaction, daily_limit);
    write_account(&ctx.accounts.agent_budget, &budget)?;

    msg!(
        "SNOWRAIL: Agent {} limits set (max_tx {}, daily {})",
        owner,
        max_transaction,
        daily_limit
    );
    emit!(AgentLimitsUpdated {
        owner,
        max_transaction,
        daily_limit,
    });

    Ok(())
}
