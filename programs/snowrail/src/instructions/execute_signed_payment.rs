use anchor_lang::prelude::*;

use crate::constants::{AGENT_SEED, ATTESTATION_SEED, SENDER_SEED, SETTLEMENT_SEED};
use crate::instructions::settle::{self, Booked};
use crate::signature::verify_ed25519_signature;
use crate::state::{
    domain_separator, enforce_gate, AgentBudget, PaymentAuthorization, ReentrancyGuard,
    SenderLedger, Settlement, TrustAttestation,
};
use crate::utils::{read_optional, transfer_from_program, write_account};

#[derive(Accounts)]
#[instruction(auth: PaymentAuthorization)]
pub struct ExecuteSignedPayment<'info> {
    #[account(mut, seeds = [SETTLEMENT_SEED], bump = settlement.bump)]
    pub settlement: Account<'info, Settlement>,

    #[account(
        mut,
        seeds = [SENDER_SEED, auth.sender.as_ref()],
        bump = sender_ledger.bump,
    )]
    pub sender_ledger: Account<'info, SenderLedger>,

    /// CHECK: receives the net amount; pinned to `auth.recipient`.
    #[account(mut, address = auth.recipient)]
    pub recipient_account: UncheckedAccount<'info>,

    /// CHECK: pinned to the configured fee sink.
    #[account(mut, address = settlement.fee_sink)]
    pub fee_sink: UncheckedAccount<'info>,

    /// CHECK: attestation record for `auth.recipient`; may be uninitialised.
    #[account(seeds = [ATTESTATION_SEED, auth.recipient.as_ref()], bump)]
    pub recipient_attestation: UncheckedAccount<'info>,

    /// CHECK: budget record for `auth.sender`; may be uninitialised.
    #[account(mut, seeds = [AGENT_SEED, auth.sender.as_ref()], bump)]
    pub sender_agent: UncheckedAccount<'info>,

    /// CHECK: instructions sysvar, read for the Ed25519 precompile entry.
    #[account(address = solana_program::sysvar::instructions::ID)]
    pub instructions: UncheckedAccount<'info>,

    /// Submits the transaction; need not be the sender.
    pub relayer: Signer<'info>,
}

/// Settles an authorization whose signature has already been checked.
///
/// Order: deadline, nonce, recipient trust, sender budget, escrow, booking.
/// An expired authorization fails on its deadline whatever nonce it carries.
pub fn settle_authorization(
    ledger: &mut SenderLedger,
    settlement: &mut Settlement,
    attestation: Option<&TrustAttestation>,
    budget: Option<&mut AgentBudget>,
    auth: &PaymentAuthorization,
    now: i64,
) -> Result<Booked> {
    auth.ensure_not_expired(now)?;
    ledger.consume_nonce(auth.nonce)?;

    enforce_gate(attestation, now)?;
    if let Some(budget) = budget {
        budget.charge(auth.amount, now)?;
    }

    ledger.debit_escrow(auth.amount)?;
    settle::book(settlement, ledger, &auth.recipient, auth.amount, auth.nonce, now)
}

pub fn handler(
    ctx: Context<ExecuteSignedPayment>,
    auth: PaymentAuthorization,
    signature: [u8; 64],
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    ctx.accounts.settlement.enter()?;
    ctx.accounts.settlement.ensure_active()?;
    auth.validate_fields()?;

    let domain = domain_separator(ctx.program_id, &ctx.accounts.settlement.domain_salt);
    let digest = auth.digest(&domain);
    verify_ed25519_signature(&ctx.accounts.instructions, &auth.sender, &digest, &signature)?;

    let attestation = read_optional::<TrustAttestation>(&ctx.accounts.recipient_attestation)?;
    let mut budget = read_optional::<AgentBudget>(&ctx.accounts.sender_agent)?;
    let booked = settle_authorization(
        &mut ctx.accounts.sender_ledger,
        &mut ctx.accounts.settlement,
        attestation.as_ref(),
        budget.as_mut(),
        &auth,
        now,
    )?;
    if let Some(budget) = &budget {
        write_account(&ctx.accounts.sender_agent, budget)?;
    }

    let ledger_info = ctx.accounts.sender_ledger.to_account_info();
    transfer_from_program(
        &ledger_info,
        &ctx.accounts.recipient_account.to_account_info(),
        booked.split.net,
    )?;
    transfer_from_program(
        &ledger_info,
        &ctx.accounts.fee_sink.to_account_info(),
        booked.split.fee,
    )?;

    msg!(
        "SNOWRAIL: Signed authorization {} of {} consumed by relayer {}",
        auth.nonce,
        auth.sender,
        ctx.accounts.relayer.key()
    );
    settle::announce(&booked, auth.sender, auth.recipient, auth.amount, auth.resource_tag);
    ctx.accounts.settlement.release();

    Ok(())
}
