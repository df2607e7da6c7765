use anchor_lang::prelude::*;

use crate::constants::{MAX_TRUST_SCORE, MIN_TRUST_SCORE_ADVISORY, MIN_TRUST_SCORE_HARD};
use crate::errors::SnowrailError;

/// Most recent Trust Oracle opinion about a target. Last write wins.
/// PDA seeds: ["attestation", target].
#[account]
pub struct TrustAttestation {
    pub target: Pubkey,
    /// 0-100
    pub trust_score: u8,
    /// Largest payment the oracle considers safe
    pub max_amount: u64,
    pub valid_until: i64,
    pub attestor: Pubkey,
    /// Hash of the oracle's check report
    pub check_hash: [u8; 32],
    pub updated_at: i64,
    pub bump: u8,
}

impl TrustAttestation {
    pub const SIZE: usize = 8 +  // discriminator
        32 +                     // target
        1 +                      // trust_score
        8 +                      // max_amount
        8 +                      // valid_until
        32 +                     // attestor
        32 +                     // check_hash
        8 +                      // updated_at
        1;                       // bump

    #[allow(clippy::too_many_arguments)]
    pub fn record(
        &mut self,
        target: Pubkey,
        trust_score: u8,
        max_amount: u64,
        valid_until: i64,
        attestor: Pubkey,
        check_hash: [u8; 32],
        now: i64,
        bump: u8,
    ) -> Result<()> {
        require!(
            trust_score <= MAX_TRUST_SCORE,
            SnowrailError::InvalidTrustScore
        );
        require!(target != Pubkey::default(), SnowrailError::ZeroAddress);

        self.target = target;
        self.trust_score = trust_score;
        self.max_amount = max_amount;
        self.valid_until = valid_until;
        self.attestor = attestor;
        self.check_hash = check_hash;
        self.updated_at = now;
        self.bump = bump;
        Ok(())
    }

    pub fn is_expired(&self, now: i64) -> bool {
        now > self.valid_until
    }
}

/// Why a gate let a payment through or stopped it.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateReason {
    /// No attestation on file; the oracle is optional.
    NoAttestation,
    /// Attestation expired; allowed, but the target should be re-validated.
    Stale,
    Trusted,
    ScoreTooLow,
    AmountAboveLimit,
}

/// Result of the advisory `can_pay` query, returned to the caller.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct PayCheck {
    pub allowed: bool,
    pub reason: GateReason,
}

impl PayCheck {
    fn allow(reason: GateReason) -> Self {
        Self {
            allowed: true,
            reason,
        }
    }

    fn deny(reason: GateReason) -> Self {
        Self {
            allowed: false,
            reason,
        }
    }
}

/// Hard gate on the settlement path. Only a low score on an active
/// attestation blocks; `max_amount` is not enforced here.
pub fn check_gate(attestation: Option<&TrustAttestation>, now: i64) -> PayCheck {
    match attestation {
        None => PayCheck::allow(GateReason::NoAttestation),
        Some(a) if a.is_expired(now) => PayCheck::allow(GateReason::Stale),
        Some(a) if a.trust_score < MIN_TRUST_SCORE_HARD => PayCheck::deny(GateReason::ScoreTooLow),
        Some(_) => PayCheck::allow(GateReason::Trusted),
    }
}

/// `check_gate` as an instruction guard.
pub fn enforce_gate(attestation: Option<&TrustAttestation>, now: i64) -> Result<GateReason> {
    let check = check_gate(attestation, now);
    require!(check.allowed, SnowrailError::InsufficientTrust);
    Ok(check.reason)
}

/// Advisory view: stricter score threshold and enforces `max_amount`.
/// Settlement paths never apply the amount ceiling.
pub fn can_pay(attestation: Option<&TrustAttestation>, amount: u64, now: i64) -> PayCheck {
    match attestation {
        None => PayCheck::allow(GateReason::NoAttestation),
        Some(a) if a.is_expired(now) => PayCheck::allow(GateReason::Stale),
        Some(a) if a.trust_score < MIN_TRUST_SCORE_ADVISORY => {
            PayCheck::deny(GateReason::ScoreTooLow)
        }
        Some(a) if amount > a.max_amount => PayCheck::deny(GateReason::AmountAboveLimit),
        Some(_) => PayCheck::allow(GateReason::Trusted),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_700_000_000;

    fn attestation(score: u8, max_amount: u64, valid_until: i64) -> TrustAttestation {
        let mut a = TrustAttestation {
            target: Pubkey::default(),
            trust_score: 0,
            max_amount: 0,
            valid_until: 0,
            attestor: Pubkey::default(),
            check_hash: [0u8; 32],
            updated_at: 0,
            bump: 0,
        };
        a.record(
            Pubkey::new_unique(),
            score,
            max_amount,
            valid_until,
            Pubkey::new_unique(),
            [1u8; 32],
            NOW,
            255,
        )
        .unwrap();
        a
    }

    #[test]
    fn test_absent_attestation_fails_open() {
        assert_eq!(check_gate(None, NOW), PayCheck::allow(GateReason::NoAttestation));
        assert!(can_pay(None, u64::MAX, NOW).allowed);
    }

    #[test]
    fn test_expired_attestation_is_stale_not_blocking() {
        let a = attestation(5, 0, NOW - 1);
        assert_eq!(check_gate(Some(&a), NOW), PayCheck::allow(GateReason::Stale));
        assert_eq!(can_pay(Some(&a), 1_000, NOW), PayCheck::allow(GateReason::Stale));
    }

    #[test]
    fn test_valid_until_is_inclusive() {
        let a = attestation(10, 0, NOW);
        assert_eq!(check_gate(Some(&a), NOW), PayCheck::deny(GateReason::ScoreTooLow));
    }

    #[test]
    fn test_hard_threshold() {
        let low = attestation(MIN_TRUST_SCORE_HARD - 1, 1_000, NOW + 60);
        let ok = attestation(MIN_TRUST_SCORE_HARD, 1_000, NOW + 60);

        assert_eq!(
            enforce_gate(Some(&low), NOW).unwrap_err(),
            SnowrailError::InsufficientTrust.into()
        );
        assert_eq!(enforce_gate(Some(&ok), NOW).unwrap(), GateReason::Trusted);
    }

    #[test]
    fn test_advisory_is_stricter_than_hard_gate() {
        // 50 passes settlement but the advisory view says no.
        let a = attestation(50, 1_000, NOW + 60);
        assert!(check_gate(Some(&a), NOW).allowed);
        assert_eq!(can_pay(Some(&a), 10, NOW), PayCheck::deny(GateReason::ScoreTooLow));
    }

    #[test]
    fn test_amount_ceiling_only_in_advisory_path() {
        let a = attestation(90, 1_000, NOW + 60);
        assert_eq!(
            can_pay(Some(&a), 1_001, NOW),
            PayCheck::deny(GateReason::AmountAboveLimit)
        );
        assert!(can_pay(Some(&a), 1_000, NOW).allowed);
        assert!(enforce_gate(Some(&a), NOW).is_ok());
    }

    #[test]
    fn test_score_out_of_range_rejected() {
        let mut a = attestation(90, 1_000, NOW + 60);
        let err = a
            .record(
                Pubkey::new_unique(),
                MAX_TRUST_SCORE + 1,
                0,
                NOW,
                Pubkey::new_unique(),
                [0u8; 32],
                NOW,
                255,
            )
            .unwrap_err();
        assert_eq!(err, SnowrailError::InvalidTrustScore.into());
        assert_eq!(a.trust_score, 90);
    }
}
