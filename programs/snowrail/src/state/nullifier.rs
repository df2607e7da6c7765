use anchor_lang::prelude::*;

use crate::errors::SnowrailError;

/// Marker that a commitment has entered the tree.
/// PDA seeds: ["commitment", commitment]. The seeds omit the denomination,
/// so a commitment enters the tree at most once across all tiers.
#[account]
pub struct CommitmentRecord {
    pub commitment: [u8; 32],
    pub leaf_index: u32,
    pub denomination: u64,
    pub inserted_at: i64,
    /// Set once the commitment is in the tree. A freshly created record is
    /// all zeroes, so `false` means "not seen yet".
    pub used: bool,
    pub bump: u8,
}

impl CommitmentRecord {
    pub const SIZE: usize = 8 +  // discriminator
        32 +                     // commitment
        4 +                      // leaf_index
        8 +                      // denomination
        8 +                      // inserted_at
        1 +                      // used
        1;                       // bump

    pub fn ensure_unseen(&self) -> Result<()> {
        require!(!self.used, SnowrailError::CommitmentAlreadyExists);
        Ok(())
    }

    pub fn mark_inserted(
        &mut self,
        commitment: [u8; 32],
        leaf_index: u32,
        denomination: u64,
        now: i64,
        bump: u8,
    ) {
        self.commitment = commitment;
        self.leaf_index = leaf_index;
        self.denomination = denomination;
        self.inserted_at = now;
        self.used = true;
        self.bump = bump;
    }
}

/// One-time spend marker for a withdrawal.
/// PDA seeds: ["nullifier", nullifier]. Unspent -> Spent, terminal.
#[account]
pub struct NullifierRecord {
    pub nullifier: [u8; 32],
    pub spent: bool,
    pub spent_at: i64,
    pub spent_slot: u64,
    pub bump: u8,
}

impl NullifierRecord {
    pub const SIZE: usize = 8 +  // discriminator
        32 +                     // nullifier
        1 +                      // spent
        8 +                      // spent_at
        8 +                      // spent_slot
        1;                       // bump

    pub fn ensure_unspent(&self) -> Result<()> {
        require!(!self.spent, SnowrailError::NullifierAlreadyUsed);
        Ok(())
    }

    pub fn mark_spent(&mut self, nullifier: [u8; 32], now: i64, slot: u64, bump: u8) -> Result<()> {
        self.ensure_unspent()?;
        self.nullifier = nullifier;
        self.spent = true;
        self.spent_at = now;
        self.spent_slot = slot;
        self.bump = bump;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fresh_nullifier() -> NullifierRecord {
        NullifierRecord {
            nullifier: [0u8; 32],
            spent: false,
            spent_at: 0,
            spent_slot: 0,
            bump: 0,
        }
    }

    #[test]
    fn test_nullifier_spends_once() {
        let mut record = fresh_nullifier();
        record.mark_spent([7u8; 32], 1_000, 42, 254).unwrap();

        assert!(record.spent);
        assert_eq!(record.spent_slot, 42);
        assert_eq!(
            record.mark_spent([7u8; 32], 2_000, 43, 254).unwrap_err(),
            SnowrailError::NullifierAlreadyUsed.into()
        );
        assert_eq!(record.spent_at, 1_000);
    }

    #[test]
    fn test_commitment_seen_once() {
        let mut record = CommitmentRecord {
            commitment: [0u8; 32],
            leaf_index: 0,
            denomination: 0,
            inserted_at: 0,
            used: false,
            bump: 0,
        };
        assert!(record.ensure_unseen().is_ok());

        record.mark_inserted([1u8; 32], 0, 100, 1_000, 255);
        assert_eq!(
            record.ensure_unseen().unwrap_err(),
            SnowrailError::CommitmentAlreadyExists.into()
        );
    }
}
