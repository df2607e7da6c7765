use anchor_lang::prelude::*;

use crate::constants::{AGENT_SEED, COMMITMENT_SEED, POOL_SEED, SENDER_SEED, SETTLEMENT_SEED};
use crate::instructions::deposit::insert_commitment;
use crate::instructions::settle;
use crate::state::{
    AnonymityPool, CommitmentRecord, FeeSplit, ReentrancyGuard, SenderLedger, Settlement,
};
use crate::utils::transfer_from_signer;

/// Settlement forwarding a payment into the anonymity pool as a deposit.
#[derive(Accounts)]
#[instruction(commitment: [u8; 32])]
pub struct BridgeToPool<'info> {
    #[account(mut, seeds = [SETTLEMENT_SEED], bump = settlement.bump)]
    pub settlement: Account<'info, Settlement>,

    #[account(mut, seeds = [POOL_SEED], bump)]
    pub pool: AccountLoader<'info, AnonymityPool>,

    #[account(
        init_if_needed,
        payer = sender,
        space = CommitmentRecord::SIZE,
        seeds = [COMMITMENT_SEED, commitment.as_ref()],
        bump,
    )]
    pub commitment_record: Account<'info, CommitmentRecord>,

    #[account(
        init_if_needed,
        payer = sender,
        space = SenderLedger::SIZE,
        seeds = [SENDER_SEED, sender.key().as_ref()],
        bump,
    )]
    pub sender_ledger: Account<'info, SenderLedger>,

    /// CHECK: budget record for `sender`; may be uninitialised.
    #[account(mut, seeds = [AGENT_SEED, sender.key().as_ref()], bump)]
    pub sender_agent: UncheckedAccount<'info>,

    #[account(mut)]
    pub sender: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<BridgeToPool>, commitment: [u8; 32], denomination: u64) -> Result<u32> {
    let now = Clock::get()?.unix_timestamp;
    let sender = ctx.accounts.sender.key();

    ctx.accounts.settlement.enter()?;
    ctx.accounts.settlement.ensure_active()?;

    settle::charge_budget(&ctx.accounts.sender_agent, denomination, now)?;

    let leaf_index = {
        let mut pool = ctx.accounts.pool.load_mut()?;
        pool.enter()?;
        insert_commitment(
            &mut pool,
            &mut ctx.accounts.commitment_record,
            commitment,
            denomination,
            now,
            ctx.bumps.commitment_record,
        )?
    };

    // The pool takes the exact denomination, so no protocol fee applies.
    ctx.accounts.settlement.record(FeeSplit {
        fee: 0,
        net: denomination,
    })?;
    let ledger = &mut ctx.accounts.sender_ledger;
    ledger.bind(sender, ctx.bumps.sender_ledger);
    ledger.stats.record_success(denomination, now)?;

    transfer_from_signer(
        &ctx.accounts.system_program,
        ctx.accounts.sender.to_account_info(),
        ctx.accounts.pool.to_account_info(),
        denomination,
    )?;

    msg!("SNOWRAIL: {} bridged {} into the pool", sender, denomination);
    ctx.accounts.pool.load_mut()?.release();
    ctx.accounts.settlement.release();

    Ok(leaf_index)
}
