use anchor_lang::prelude::*;

use crate::constants::SENDER_SEED;
use crate::events::EscrowReclaimed;
use crate::state::SenderLedger;
use crate::utils::transfer_from_program;

#[derive(Accounts)]
pub struct ReclaimEscrow<'info> {
    #[account(
        mut,
        seeds = [SENDER_SEED, sender.key().as_ref()],
        bump = sender_ledger.bump,
        constraint = sender_ledger.owner == sender.key(),
    )]
    pub sender_ledger: Account<'info, SenderLedger>,

    #[account(mut)]
    pub sender: Signer<'info>,
}

pub fn handler(ctx: Context<ReclaimEscrow>, amount: u64) -> Result<()> {
    let sender = ctx.accounts.sender.key();
    ctx.accounts.sender_ledger.debit_escrow(amount)?;

    transfer_from_program(
        &ctx.accounts.sender_ledger.to_account_info(),
        &ctx.accounts.sender.to_account_info(),
        amount,
    )?;

    msg!("SNOWRAIL: Escrow for {} reclaimed {}", sender, amount);
    emit!(EscrowReclaimed { sender, amount });

    Ok(())
}
