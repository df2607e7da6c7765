use anchor_lang::prelude::*;

use crate::constants::SENDER_SEED;
use crate::events::EscrowFunded;
use crate::state::SenderLedger;
use crate::utils::transfer_from_signer;

#[derive(Accounts)]
pub struct FundEscrow<'info> {
    #[account(
        init_if_needed,
        payer = sender,
        space = SenderLedger::SIZE,
        seeds = [SENDER_SEED, sender.key().as_ref()],
        bump,
    )]
    pub sender_ledger: Account<'info, SenderLedger>,

    #[account(mut)]
    pub sender: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<FundEscrow>, amount: u64) -> Result<()> {
    let sender = ctx.accounts.sender.key();
    let ledger = &mut ctx.accounts.sender_ledger;
    ledger.bind(sender, ctx.bumps.sender_ledger);
    ledger.credit_escrow(amount)?;
    let escrow = ledger.escrow;

    transfer_from_signer(
        &ctx.accounts.system_program,
        ctx.accounts.sender.to_account_info(),
        ctx.accounts.sender_ledger.to_account_info(),
        amount,
    )?;

    msg!("SNOWRAIL: Escrow for {} funded with {} (balance {})", sender, amount, escrow);
    emit!(EscrowFunded { sender, amount });

    Ok(())
}
