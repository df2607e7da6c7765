use anchor_lang::prelude::*;

use crate::constants::{AGENT_SEED, ATTESTATION_SEED, SENDER_SEED, SETTLEMENT_SEED};
use crate::errors::SnowrailError;
use crate::instructions::settle;
use crate::state::{ReentrancyGuard, SenderLedger, Settlement};
use crate::utils::transfer_from_signer;

#[derive(Accounts)]
#[instruction(recipient: Pubkey)]
pub struct Pay<'info> {
    #[account(mut, seeds = [SETTLEMENT_SEED], bump = settlement.bump)]
    pub settlement: Account<'info, Settlement>,

    #[account(
        init_if_needed,
        payer = sender,
        space = SenderLedger::SIZE,
        seeds = [SENDER_SEED, sender.key().as_ref()],
        bump,
    )]
    pub sender_ledger: Account<'info, SenderLedger>,

    /// CHECK: receives the net amount; pinned to the `recipient` argument.
    #[account(mut, address = recipient)]
    pub recipient_account: UncheckedAccount<'info>,

    /// CHECK: pinned to the configured fee sink.
    #[account(mut, address = settlement.fee_sink)]
    pub fee_sink: UncheckedAccount<'info>,

    /// CHECK: attestation record for `recipient`; may be uninitialised.
    #[account(seeds = [ATTESTATION_SEED, recipient.as_ref()], bump)]
    pub recipient_attestation: UncheckedAccount<'info>,

    /// CHECK: budget record for `sender`; may be uninitialised.
    #[account(mut, seeds = [AGENT_SEED, sender.key().as_ref()], bump)]
    pub sender_agent: UncheckedAccount<'info>,

    #[account(mut)]
    pub sender: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handler(
    ctx: Context<Pay>,
    recipient: Pubkey,
    amount: u64,
    resource_tag: [u8; 32],
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let sender = ctx.accounts.sender.key();

    ctx.accounts.settlement.enter()?;
    ctx.accounts.settlement.ensure_active()?;
    require!(amount > 0, SnowrailError::InvalidAmount);
    require!(recipient != Pubkey::default(), SnowrailError::ZeroAddress);

    settle::gate_recipient(&ctx.accounts.recipient_attestation, now)?;
    settle::charge_budget(&ctx.accounts.sender_agent, amount, now)?;

    let ledger = &mut ctx.accounts.sender_ledger;
    ledger.bind(sender, ctx.bumps.sender_ledger);
    // Direct payments do not consume a nonce; the current value only feeds the id.
    let nonce = ledger.nonce;
    let booked = settle::book(
        &mut ctx.accounts.settlement,
        ledger,
        &recipient,
        amount,
        nonce,
        now,
    )?;

    transfer_from_signer(
        &ctx.accounts.system_program,
        ctx.accounts.sender.to_account_info(),
        ctx.accounts.recipient_account.to_account_info(),
        booked.split.net,
    )?;
    transfer_from_signer(
        &ctx.accounts.system_program,
        ctx.accounts.sender.to_account_info(),
        ctx.accounts.fee_sink.to_account_info(),
        booked.split.fee,
    )?;

    settle::announce(&booked, sender, recipient, amount, resource_tag);
    ctx.accounts.settlement.release();

    Ok(())
}
