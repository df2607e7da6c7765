use anchor_lang::prelude::*;

use crate::constants::{MAX_AGENT_NAME_LEN, MAX_AGENT_VERSION_LEN, SECONDS_PER_DAY};
use crate::errors::SnowrailError;

/// Spending caps for a budget-bearing agent.
/// PDA seeds: ["agent", owner]. Senders without one are not budget-gated.
#[account]
pub struct AgentBudget {
    pub owner: Pubkey,
    pub name: String,
    pub version: String,
    /// Hash of the agent's declared capabilities
    pub caps_hash: [u8; 32],
    pub max_transaction: u64,
    pub daily_limit: u64,
    pub spent_today: u64,
    /// Day number (unix seconds / 86400) of the last reset
    pub last_reset_day: i64,
    pub registered_at: i64,
    pub bump: u8,
}

impl AgentBudget {
    pub const SIZE: usize = 8 +          // discriminator
        32 +                             // owner
        4 + MAX_AGENT_NAME_LEN +         // name
        4 + MAX_AGENT_VERSION_LEN +      // version
        32 +                             // caps_hash
        8 +                              // max_transaction
        8 +                              // daily_limit
        8 +                              // spent_today
        8 +                              // last_reset_day
        8 +                              // registered_at
        1;                               // bump

    #[allow(clippy::too_many_arguments)]
    pub fn register(
        &mut self,
        owner: Pubkey,
        name: String,
        version: String,
        daily_limit: u64,
        caps_hash: [u8; 32],
        now: i64,
        bump: u8,
    ) -> Result<()> {
        require!(
            name.len() <= MAX_AGENT_NAME_LEN && version.len() <= MAX_AGENT_VERSION_LEN,
            SnowrailError::AgentNameTooLong
        );

        self.owner = owner;
        self.name = name;
        self.version = version;
        self.caps_hash = caps_hash;
        self.max_transaction = daily_limit;
        self.daily_limit = daily_limit;
        self.spent_today = 0;
        self.last_reset_day = day_of(now);
        self.registered_at = now;
        self.bump = bump;
        Ok(())
    }

    pub fn set_limits(&mut self, max_transaction: u64, daily_limit: u64) {
        self.max_transaction = max_transaction;
        self.daily_limit = daily_limit;
    }

    /// Reset `spent_today` if a new day has started. Runs as part of `charge`
    /// so a charge straddling midnight always sees a fresh budget.
    fn roll_day(&mut self, now: i64) {
        let today = day_of(now);
        if today > self.last_reset_day {
            self.spent_today = 0;
            self.last_reset_day = today;
        }
    }

    pub fn charge(&mut self, amount: u64, now: i64) -> Result<()> {
        self.roll_day(now);

        require!(
            amount <= self.max_transaction,
            SnowrailError::TransactionLimitExceeded
        );
        let spent = self
            .spent_today
            .checked_add(amount)
            .ok_or(SnowrailError::MathOverflow)?;
        require!(spent <= self.daily_limit, SnowrailError::DailyLimitExceeded);

        self.spent_today = spent;
        Ok(())
    }

    /// Budget left today as seen at `now`, without mutating state.
    pub fn remaining(&self, now: i64) -> u64 {
        if day_of(now) > self.last_reset_day {
            self.daily_limit
        } else {
            self.daily_limit.saturating_sub(self.spent_today)
        }
    }
}

pub fn day_of(now: i64) -> i64 {
    now.div_euclid(SECONDS_PER_DAY)
}
