use anchor_lang::prelude::*;

use crate::constants::{NULLIFIER_SEED, POOL_SEED};
use crate::errors::SnowrailError;
use crate::events::Withdrawn;
use crate::proof::{ProofVerifier, PublicInputs, ACTIVE_VERIFIER, MAX_PROOF_LEN};
use crate::state::{AnonymityPool, NullifierRecord, ReentrancyGuard};
use crate::utils::transfer_from_program;

#[derive(Accounts)]
#[instruction(
    proof: Vec<u8>,
    root: [u8; 32],
    nullifier: [u8; 32],
    recipient: Pubkey,
    relayer: Pubkey,
)]
pub struct Withdraw<'info> {
    #[account(mut, seeds = [POOL_SEED], bump)]
    pub pool: AccountLoader<'info, AnonymityPool>,

    #[account(
        init_if_needed,
        payer = payer,
        space = NullifierRecord::SIZE,
        seeds = [NULLIFIER_SEED, nullifier.as_ref()],
        bump,
    )]
    pub nullifier_record: Account<'info, NullifierRecord>,

    /// CHECK: receives `denomination - fee`; pinned to `recipient`.
    #[account(mut, address = recipient)]
    pub recipient_account: UncheckedAccount<'info>,

    /// CHECK: receives `fee` when `relayer` is set; pinned to it in that case.
    #[account(mut)]
    pub relayer_account: UncheckedAccount<'info>,

    /// Pays rent for the nullifier record.
    #[account(mut)]
    pub payer: Signer<'info>,

    pub system_program: Program<'info, System>,
}

/// Runs every withdrawal check and spends the nullifier. Returns what the
/// recipient is owed.
///
/// Order: recipient, tier and fee, root window, nullifier, proof. The
/// nullifier is marked spent before any value leaves the pool.
#[allow(clippy::too_many_arguments)]
pub fn authorize_withdrawal<V: ProofVerifier>(
    pool: &mut AnonymityPool,
    record: &mut NullifierRecord,
    verifier: &V,
    inputs: &PublicInputs,
    proof: &[u8],
    now: i64,
    slot: u64,
    bump: u8,
) -> Result<u64> {
    require!(inputs.recipient != Pubkey::default(), SnowrailError::ZeroAddress);

    pool.check_withdrawal(&inputs.root, inputs.denomination, inputs.fee)?;
    record.ensure_unspent()?;

    require!(
        proof.len() <= MAX_PROOF_LEN && verifier.verify(proof, inputs),
        SnowrailError::InvalidProof
    );

    record.mark_spent(inputs.nullifier, now, slot, bump)?;
    pool.record_withdrawal(inputs.denomination)?;

    let net = inputs
        .denomination
        .checked_sub(inputs.fee)
        .ok_or(SnowrailError::InvalidFee)?;
    Ok(net)
}

/// Fee owed to `relayer_account`. Nothing is owed without both a fee and a
/// named relayer; when one is owed the account must be that relayer.
pub fn relayer_payout(inputs: &PublicInputs, relayer_account: &Pubkey) -> Result<Option<u64>> {
    if inputs.fee == 0 || inputs.relayer == Pubkey::default() {
        return Ok(None);
    }
    require_keys_eq!(*relayer_account, inputs.relayer, SnowrailError::Unauthorized);
    Ok(Some(inputs.fee))
}

#[allow(clippy::too_many_arguments)]
pub fn handler(
    ctx: Context<Withdraw>,
    proof: Vec<u8>,
    root: [u8; 32],
    nullifier: [u8; 32],
    recipient: Pubkey,
    relayer: Pubkey,
    fee: u64,
    denomination: u64,
) -> Result<()> {
    let clock = Clock::get()?;
    let inputs = PublicInputs {
        root,
        nullifier,
        recipient,
        relayer,
        fee,
        denomination,
    };

    let net = {
        let mut pool = ctx.accounts.pool.load_mut()?;
        pool.enter()?;
        authorize_withdrawal(
            &mut pool,
            &mut ctx.accounts.nullifier_record,
            &ACTIVE_VERIFIER,
            &inputs,
            &proof,
            clock.unix_timestamp,
            clock.slot,
            ctx.bumps.nullifier_record,
        )?
    };
    let relayer_fee = relayer_payout(&inputs, ctx.accounts.relayer_account.key)?;

    let pool_info = ctx.accounts.pool.to_account_info();
    transfer_from_program(&pool_info, &ctx.accounts.recipient_account.to_account_info(), net)?;
    if let Some(fee) = relayer_fee {
        transfer_from_program(&pool_info, &ctx.accounts.relayer_account.to_account_info(), fee)?;
    }

    msg!(
        "SNOWRAIL: Withdrawal of {} to {} (relayer fee {})",
        denomination,
        recipient,
        fee
    );
    emit!(Withdrawn {
        nullifier,
        recipient,
        relayer,
        fee,
        denomination,
    });
    ctx.accounts.pool.load_mut()?.release();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proof::NonEmptyProofVerifier;
    use crate::state::pool::empty_pool;
    use std::cell::Cell;

    const TIER: u64 = 1_000;

    fn funded_pool() -> (AnonymityPool, [u8; 32]) {
        let mut pool = empty_pool();
        pool.initialize(Pubkey::new_unique(), [100, TIER, 10_000], 255).unwrap();
        let (_, root) = pool.record_deposit([9u8; 32], TIER).unwrap();
        (pool, root)
    }

    fn fresh_record() -> NullifierRecord {
        NullifierRecord {
            nullifier: [0u8; 32],
            spent: false,
            spent_at: 0,
            spent_slot: 0,
            bump: 0,
        }
    }

    fn inputs(root: [u8; 32]) -> PublicInputs {
        PublicInputs {
            root,
            nullifier: [4u8; 32],
            recipient: Pubkey::new_unique(),
            relayer: Pubkey::default(),
            fee: 0,
            denomination: TIER,
        }
    }

    /// Counts how often it is asked; accepts everything.
    struct Counting(Cell<u32>);

    impl ProofVerifier for Counting {
        fn verify(&self, _proof: &[u8], _inputs: &PublicInputs) -> bool {
            self.0.set(self.0.get() + 1);
            true
        }
    }

    #[test]
    fn test_withdrawal_spends_nullifier_before_payout() {
        let (mut pool, root) = funded_pool();
        let mut record = fresh_record();
        let mut i = inputs(root);
        i.fee = 30;

        let net = authorize_withdrawal(
            &mut pool,
            &mut record,
            &NonEmptyProofVerifier,
            &i,
            &[1u8; 64],
            1_700,
            42,
            253,
        )
        .unwrap();

        assert_eq!(net, TIER - 30);
        assert!(record.spent);
        assert_eq!(record.nullifier, [4u8; 32]);
        assert_eq!(record.spent_slot, 42);
        assert_eq!(pool.nullifier_count, 1);
        assert_eq!(pool.tier(TIER).unwrap().total_withdrawals, TIER);
    }

    #[test]
    fn test_spent_nullifier_reported_before_proof() {
        let (mut pool, root) = funded_pool();
        let mut record = fresh_record();
        record.spent = true;
        let verifier = Counting(Cell::new(0));

        assert_eq!(
            authorize_withdrawal(
                &mut pool,
                &mut record,
                &NonEmptyProofVerifier,
                &inputs(root),
                &[],
                0,
                0,
                0
            )
            .unwrap_err(),
            SnowrailError::NullifierAlreadyUsed.into()
        );
        assert_eq!(
            authorize_withdrawal(
                &mut pool,
                &mut record,
                &verifier,
                &inputs(root),
                &[1u8; 8],
                0,
                0,
                0
            )
            .unwrap_err(),
            SnowrailError::NullifierAlreadyUsed.into()
        );
        assert_eq!(verifier.0.get(), 0);
        assert_eq!(pool.nullifier_count, 0);
    }

    #[test]
    fn test_unknown_root_reported_before_nullifier() {
        let (mut pool, _) = funded_pool();
        let mut record = fresh_record();
        record.spent = true;

        assert_eq!(
            authorize_withdrawal(
                &mut pool,
                &mut record,
                &NonEmptyProofVerifier,
                &inputs([0xAB; 32]),
                &[1u8; 8],
                0,
                0,
                0
            )
            .unwrap_err(),
            SnowrailError::InvalidMerkleRoot.into()
        );
    }

    #[test]
    fn test_empty_or_oversized_proof_rejected() {
        let (mut pool, root) = funded_pool();
        let mut record = fresh_record();
        let verifier = Counting(Cell::new(0));

        assert_eq!(
            authorize_withdrawal(
                &mut pool,
                &mut record,
                &NonEmptyProofVerifier,
                &inputs(root),
                &[],
                0,
                0,
                0
            )
            .unwrap_err(),
            SnowrailError::InvalidProof.into()
        );

        let oversized = vec![1u8; MAX_PROOF_LEN + 1];
        assert_eq!(
            authorize_withdrawal(
                &mut pool,
                &mut record,
                &verifier,
                &inputs(root),
                &oversized,
                0,
                0,
                0
            )
            .unwrap_err(),
            SnowrailError::InvalidProof.into()
        );
        // Length gate runs before the verifier is consulted.
        assert_eq!(verifier.0.get(), 0);

        assert!(!record.spent);
        assert_eq!(pool.nullifier_count, 0);

        let at_limit = vec![1u8; MAX_PROOF_LEN];
        assert!(authorize_withdrawal(
            &mut pool,
            &mut record,
            &verifier,
            &inputs(root),
            &at_limit,
            0,
            0,
            0
        )
        .is_ok());
        assert_eq!(verifier.0.get(), 1);
    }

    #[test]
    fn test_zero_recipient_rejected() {
        let (mut pool, root) = funded_pool();
        let mut record = fresh_record();
        let mut i = inputs(root);
        i.recipient = Pubkey::default();

        assert_eq!(
            authorize_withdrawal(
                &mut pool,
                &mut record,
                &NonEmptyProofVerifier,
                &i,
                &[1u8; 8],
                0,
                0,
                0
            )
            .unwrap_err(),
            SnowrailError::ZeroAddress.into()
        );
    }

    #[test]
    fn test_fee_above_denomination_rejected() {
        let (mut pool, root) = funded_pool();
        let mut record = fresh_record();
        let mut i = inputs(root);
        i.fee = TIER + 1;

        assert_eq!(
            authorize_withdrawal(
                &mut pool,
                &mut record,
                &NonEmptyProofVerifier,
                &i,
                &[1u8; 8],
                0,
                0,
                0
            )
            .unwrap_err(),
            SnowrailError::InvalidFee.into()
        );
    }

    #[test]
    fn test_relayer_payout() {
        let relayer = Pubkey::new_unique();
        let elsewhere = Pubkey::new_unique();
        let mut i = inputs([1u8; 32]);

        // No fee: nothing owed, whoever is passed.
        i.relayer = relayer;
        assert_eq!(relayer_payout(&i, &elsewhere).unwrap(), None);

        // Fee without a named relayer: skipped.
        i.fee = 25;
        i.relayer = Pubkey::default();
        assert_eq!(relayer_payout(&i, &elsewhere).unwrap(), None);

        i.relayer = relayer;
        assert_eq!(relayer_payout(&i, &relayer).unwrap(), Some(25));
        assert_eq!(
            relayer_payout(&i, &elsewhere).unwrap_err(),
            SnowrailError::Unauthorized.into()
        );
    }
}
