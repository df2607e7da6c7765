//! Settlement steps shared by the direct, signed and bridging pay paths.

use anchor_lang::prelude::*;

use crate::errors::SnowrailError;
use crate::events::SettlementCompleted;
use crate::state::{
    enforce_gate, settlement_id, AgentBudget, FeeSplit, SenderLedger, Settlement, TrustAttestation,
};
use crate::utils::{read_optional, write_account};

/// Outcome of booking a settlement, before any lamports move.
#[derive(Debug)]
pub struct Booked {
    pub id: [u8; 32],
    pub split: FeeSplit,
}

/// Trust gate on the recipient. `max_amount` is not enforced here; only the
/// advisory `can_pay` query applies it.
pub fn gate_recipient(attestation_info: &AccountInfo, now: i64) -> Result<()> {
    let attestation = read_optional::<TrustAttestation>(attestation_info)?;
    enforce_gate(attestation.as_ref(), now)?;
    Ok(())
}

/// Charge the sender's agent budget if one is registered.
pub fn charge_budget(agent_info: &AccountInfo, amount: u64, now: i64) -> Result<()> {
    if let Some(mut budget) = read_optional::<AgentBudget>(agent_info)? {
        budget.charge(amount, now)?;
        write_account(agent_info, &budget)?;
    }
    Ok(())
}

/// Fee split, global totals, sender stats and the audit id.
pub fn book(
    settlement: &mut Settlement,
    ledger: &mut SenderLedger,
    recipient: &Pubkey,
    amount: u64,
    nonce: u64,
    now: i64,
) -> Result<Booked> {
    require!(*recipient != Pubkey::default(), SnowrailError::ZeroAddress);

    let split = settlement.split(amount)?;
    settlement.record(split)?;
    ledger.stats.record_success(amount, now)?;

    Ok(Booked {
        id: settlement_id(&ledger.owner, recipient, amount, nonce, now),
        split,
    })
}

pub fn announce(
    booked: &Booked,
    sender: Pubkey,
    recipient: Pubkey,
    amount: u64,
    resource_tag: [u8; 32],
) {
    msg!(
        "SNOWRAIL: Settled {} from {} to {} (fee {}, net {})",
        amount,
        sender,
        recipient,
        booked.split.fee,
        booked.split.net
    );
    emit!(SettlementCompleted {
        id: booked.id,
        sender,
        recipient,
        amount,
        fee: booked.split.fee,
        resource_tag,
    });
}
