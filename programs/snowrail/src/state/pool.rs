use anchor_lang::prelude::*;

use crate::constants::DENOMINATION_COUNT;
use crate::errors::SnowrailError;
use crate::state::guard::ReentrancyGuard;
use crate::state::merkle::{hash_leaf, IncrementalMerkleTree, RootHistory};

/// One fixed deposit size and its running totals.
/// All members of a tier are value-fungible, which is what makes the
/// anonymity set meaningful.
#[zero_copy(unsafe)]
#[repr(C)]
#[derive(Default, PartialEq, Eq, Debug)]
pub struct DenominationPool {
    pub amount: u64,
    pub total_deposits: u64,
    pub total_withdrawals: u64,
    /// 1 while the tier accepts deposits
    pub active: u8,
    pub _padding: [u8; 7],
}

impl DenominationPool {
    pub const SIZE: usize = 8 + 8 + 8 + 1 + 7;

    pub fn is_active(&self) -> bool {
        self.active != 0
    }
}

/// Anonymity pool: commitment accumulator, recent roots and tier totals.
/// PDA seeds: ["pool"]. The account itself holds the pooled lamports.
/// Zero-copy, so the tree and root window are never copied onto the stack.
#[account(zero_copy(unsafe))]
#[repr(C)]
pub struct AnonymityPool {
    pub authority: Pubkey,
    pub denominations: [DenominationPool; DENOMINATION_COUNT],
    pub commitment_count: u64,
    pub nullifier_count: u64,
    pub tree: IncrementalMerkleTree,
    pub root_history: RootHistory,
    pub locked: u8,
    pub bump: u8,
    pub _padding: [u8; 6],
}

impl AnonymityPool {
    pub const SIZE: usize = 8 + std::mem::size_of::<AnonymityPool>();

    pub fn initialize(
        &mut self,
        authority: Pubkey,
        amounts: [u64; DENOMINATION_COUNT],
        bump: u8,
    ) -> Result<()> {
        for (i, amount) in amounts.iter().enumerate() {
            require!(*amount > 0, SnowrailError::InvalidDenomination);
            require!(
                !amounts[..i].contains(amount),
                SnowrailError::InvalidDenomination
            );
        }

        self.authority = authority;
        self.tree.reset();
        self.root_history.reset();
        self.denominations = amounts.map(|amount| DenominationPool {
            amount,
            active: 1,
            ..DenominationPool::default()
        });
        self.commitment_count = 0;
        self.nullifier_count = 0;
        self.locked = 0;
        self.bump = bump;
        Ok(())
    }

    fn tier_index(&self, denomination: u64) -> Result<usize> {
        self.denominations
            .iter()
            .position(|tier| tier.amount == denomination)
            .ok_or_else(|| error!(SnowrailError::InvalidDenomination))
    }

    pub fn tier(&self, denomination: u64) -> Result<&DenominationPool> {
        let index = self.tier_index(denomination)?;
        Ok(&self.denominations[index])
    }

    pub fn set_active(&mut self, denomination: u64, active: bool) -> Result<()> {
        let index = self.tier_index(denomination)?;
        self.denominations[index].active = u8::from(active);
        Ok(())
    }

    /// Denomination must be one of the tiers and that tier must be open.
    pub fn ensure_accepting(&self, denomination: u64) -> Result<()> {
        require!(self.tier(denomination)?.is_active(), SnowrailError::PoolNotActive);
        Ok(())
    }

    pub fn is_known_root(&self, root: &[u8; 32]) -> bool {
        self.root_history.contains(root)
    }

    /// Pool bookkeeping for a deposit. The caller must already have checked
    /// that `commitment` is unseen; the lamport transfer happens afterwards.
    /// Returns `(leaf_index, new_root)`.
    pub fn record_deposit(
        &mut self,
        commitment: [u8; 32],
        denomination: u64,
    ) -> Result<(u32, [u8; 32])> {
        self.ensure_accepting(denomination)?;
        let index = self.tier_index(denomination)?;

        let (leaf_index, root) = self.tree.insert(hash_leaf(&commitment))?;
        self.root_history.push(root);

        let tier = &mut self.denominations[index];
        tier.total_deposits = tier
            .total_deposits
            .checked_add(denomination)
            .ok_or(SnowrailError::MathOverflow)?;
        self.commitment_count = self
            .commitment_count
            .checked_add(1)
            .ok_or(SnowrailError::MathOverflow)?;

        Ok((leaf_index, root))
    }

    /// Cheap withdrawal checks that run before any proof evaluation.
    pub fn check_withdrawal(&self, root: &[u8; 32], denomination: u64, fee: u64) -> Result<()> {
        self.tier(denomination)?;
        require!(fee <= denomination, SnowrailError::InvalidFee);
        require!(self.is_known_root(root), SnowrailError::InvalidMerkleRoot);
        Ok(())
    }

    pub fn record_withdrawal(&mut self, denomination: u64) -> Result<()> {
        let index = self.tier_index(denomination)?;
        let tier = &mut self.denominations[index];
        tier.total_withdrawals = tier
            .total_withdrawals
            .checked_add(denomination)
            .ok_or(SnowrailError::MathOverflow)?;
        self.nullifier_count = self
            .nullifier_count
            .checked_add(1)
            .ok_or(SnowrailError::MathOverflow)?;
        Ok(())
    }
}

impl ReentrancyGuard for AnonymityPool {
    fn is_locked(&self) -> bool {
        self.locked != 0
    }

    fn set_locked(&mut self, locked: bool) {
        self.locked = u8::from(locked);
    }
}

/// A pool account exactly as `load_init` hands it over: every byte zero.
#[cfg(test)]
pub(crate) fn empty_pool() -> AnonymityPool {
    use crate::constants::MERKLE_DEPTH;

    AnonymityPool {
        authority: Pubkey::default(),
        denominations: [DenominationPool::default(); DENOMINATION_COUNT],
        commitment_count: 0,
        nullifier_count: 0,
        tree: IncrementalMerkleTree {
            filled_subtrees: [[0u8; 32]; MERKLE_DEPTH],
            zeros: [[0u8; 32]; MERKLE_DEPTH],
            current_root: [0u8; 32],
            next_index: 0,
            _padding: [0u8; 4],
        },
        root_history: RootHistory::new(),
        locked: 0,
        bump: 0,
        _padding: [0u8; 6],
    }
}
