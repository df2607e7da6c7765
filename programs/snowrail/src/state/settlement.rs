use anchor_lang::prelude::*;
use solana_program::keccak;

use crate::constants::{BPS_DENOMINATOR, MAX_FEE_BPS};
use crate::errors::SnowrailError;
use crate::state::guard::ReentrancyGuard;

/// Global settlement configuration and running totals.
/// PDA seeds: ["settlement"].
#[account]
pub struct Settlement {
    pub admin: Pubkey,
    /// Receives the protocol fee on every settlement
    pub fee_sink: Pubkey,
    /// Protocol fee in basis points, never above MAX_FEE_BPS
    pub fee_bps: u16,
    pub paused: bool,
    pub locked: bool,
    /// Deployment-unique salt mixed into the signing domain
    pub domain_salt: [u8; 32],
    pub total_volume: u64,
    pub total_fees: u64,
    pub settlement_count: u64,
    pub bump: u8,
}

/// Split of a settled amount.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FeeSplit {
    pub fee: u64,
    pub net: u64,
}

impl Settlement {
    pub const SIZE: usize = 8 +  // discriminator
        32 +                     // admin
        32 +                     // fee_sink
        2 +                      // fee_bps
        1 +                      // paused
        1 +                      // locked
        32 +                     // domain_salt
        8 +                      // total_volume
        8 +                      // total_fees
        8 +                      // settlement_count
        1;                       // bump

    pub fn set_fee_bps(&mut self, bps: u16) -> Result<u16> {
        require!(bps <= MAX_FEE_BPS, SnowrailError::FeeTooHigh);
        let old = self.fee_bps;
        self.fee_bps = bps;
        Ok(old)
    }

    pub fn ensure_active(&self) -> Result<()> {
        require!(!self.paused, SnowrailError::Paused);
        Ok(())
    }

    pub fn split(&self, amount: u64) -> Result<FeeSplit> {
        split_fee(amount, self.fee_bps)
    }

    pub fn record(&mut self, split: FeeSplit) -> Result<()> {
        let amount = split
            .fee
            .checked_add(split.net)
            .ok_or(SnowrailError::MathOverflow)?;
        self.total_volume = self
            .total_volume
            .checked_add(amount)
            .ok_or(SnowrailError::MathOverflow)?;
        self.total_fees = self
            .total_fees
            .checked_add(split.fee)
            .ok_or(SnowrailError::MathOverflow)?;
        self.settlement_count = self
            .settlement_count
            .checked_add(1)
            .ok_or(SnowrailError::MathOverflow)?;
        Ok(())
    }
}

impl ReentrancyGuard for Settlement {
    fn is_locked(&self) -> bool {
        self.locked
    }

    fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
    }
}

/// fee = floor(amount * bps / 10000), net = amount - fee.
pub fn split_fee(amount: u64, fee_bps: u16) -> Result<FeeSplit> {
    require!(amount > 0, SnowrailError::InvalidAmount);
    require!(fee_bps <= MAX_FEE_BPS, SnowrailError::FeeTooHigh);

    let fee = (amount as u128 * fee_bps as u128 / BPS_DENOMINATOR as u128) as u64;
    let net = amount.checked_sub(fee).ok_or(SnowrailError::MathOverflow)?;
    Ok(FeeSplit { fee, net })
}

/// Audit handle for a settlement. Identical inputs within the same second
/// produce the same id.
pub fn settlement_id(
    sender: &Pubkey,
    recipient: &Pubkey,
    amount: u64,
    nonce: u64,
    timestamp: i64,
) -> [u8; 32] {
    keccak::hashv(&[
        sender.as_ref(),
        recipient.as_ref(),
        &amount.to_le_bytes(),
        &nonce.to_le_bytes(),
        &timestamp.to_le_bytes(),
    ])
    .to_bytes()
}
