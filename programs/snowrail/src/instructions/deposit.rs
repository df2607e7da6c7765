use anchor_lang::prelude::*;

use crate::constants::{COMMITMENT_SEED, POOL_SEED};
use crate::events::Deposited;
use crate::state::{AnonymityPool, CommitmentRecord, ReentrancyGuard};
use crate::utils::transfer_from_signer;

#[derive(Accounts)]
#[instruction(commitment: [u8; 32])]
pub struct Deposit<'info> {
    #[account(mut, seeds = [POOL_SEED], bump)]
    pub pool: AccountLoader<'info, AnonymityPool>,

    #[account(
        init_if_needed,
        payer = depositor,
        space = CommitmentRecord::SIZE,
        seeds = [COMMITMENT_SEED, commitment.as_ref()],
        bump,
    )]
    pub commitment_record: Account<'info, CommitmentRecord>,

    #[account(mut)]
    pub depositor: Signer<'info>,

    pub system_program: Program<'info, System>,
}

/// Insert `commitment` into the pool tree. Returns the leaf index.
pub fn insert_commitment(
    pool: &mut AnonymityPool,
    record: &mut CommitmentRecord,
    commitment: [u8; 32],
    denomination: u64,
    now: i64,
    bump: u8,
) -> Result<u32> {
    pool.ensure_accepting(denomination)?;
    record.ensure_unseen()?;

    let (leaf_index, root) = pool.record_deposit(commitment, denomination)?;
    record.mark_inserted(commitment, leaf_index, denomination, now, bump);

    msg!(
        "SNOWRAIL: Commitment inserted at leaf {} (denomination {})",
        leaf_index,
        denomination
    );
    emit!(Deposited {
        commitment,
        leaf_index,
        root,
        denomination,
        timestamp: now,
    });

    Ok(leaf_index)
}

pub fn handler(ctx: Context<Deposit>, commitment: [u8; 32], denomination: u64) -> Result<u32> {
    let now = Clock::get()?.unix_timestamp;

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

    // Value moves last so a failed transfer also unwinds the insertion. The
    // pool borrow above is released before the system program touches it.
    transfer_from_signer(
        &ctx.accounts.system_program,
        ctx.accounts.depositor.to_account_info(),
        ctx.accounts.pool.to_account_info(),
        denomination,
    )?;
    ctx.accounts.pool.load_mut()?.release();

    Ok(leaf_index)
}
