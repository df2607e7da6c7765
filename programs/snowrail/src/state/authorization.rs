use anchor_lang::prelude::*;
use solana_program::keccak;

use crate::constants::NATIVE_TOKEN;
use crate::errors::SnowrailError;

/// Schema tag for the typed authorization payload.
pub const PAYMENT_AUTHORIZATION_SCHEMA: &[u8] = concat!(
    "PaymentAuthorization(",
    "pubkey sender,pubkey recipient,u64 amount,pubkey token,",
    "u64 nonce,i64 deadline,bytes32 resourceTag)"
)
.as_bytes();
/// Tag for the replay domain of this program.
pub const DOMAIN_TAG: &[u8] = b"SnowRail Settlement v1";

/// Typed-data prefix, so a digest can never collide with a raw message hash.
const TYPED_DATA_PREFIX: [u8; 2] = [0x19, 0x01];

/// Signed, single-use intent to move value from `sender` to `recipient`.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct PaymentAuthorization {
    pub sender: Pubkey,
    pub recipient: Pubkey,
    pub amount: u64,
    pub token: Pubkey,
    pub nonce: u64,
    pub deadline: i64,
    pub resource_tag: [u8; 32],
}

impl PaymentAuthorization {
    /// Digest the signer commits to, bound to `domain`.
    pub fn digest(&self, domain: &[u8; 32]) -> [u8; 32] {
        digest(
            PAYMENT_AUTHORIZATION_SCHEMA,
            domain,
            &[
                self.sender.as_ref(),
                self.recipient.as_ref(),
                &self.amount.to_le_bytes(),
                self.token.as_ref(),
                &self.nonce.to_le_bytes(),
                &self.deadline.to_le_bytes(),
                &self.resource_tag,
            ],
        )
    }

    /// Stateless checks that hold before any account is consulted.
    pub fn validate_fields(&self) -> Result<()> {
        require!(self.amount > 0, SnowrailError::InvalidAmount);
        require!(
            self.recipient != Pubkey::default(),
            SnowrailError::ZeroAddress
        );
        require_keys_eq!(self.token, NATIVE_TOKEN, SnowrailError::UnsupportedToken);
        Ok(())
    }

    pub fn ensure_not_expired(&self, now: i64) -> Result<()> {
        require!(now <= self.deadline, SnowrailError::ExpiredDeadline);
        Ok(())
    }
}

/// Replay domain unique to one deployment: the program id plus a salt chosen
/// at initialization.
pub fn domain_separator(program_id: &Pubkey, salt: &[u8; 32]) -> [u8; 32] {
    keccak::hashv(&[DOMAIN_TAG, program_id.as_ref(), salt]).to_bytes()
}

/// Structured digest: keccak(0x19 0x01 || domain || keccak(schema || fields...)).
/// Independent of the signature algorithm that later signs it.
pub fn digest(schema: &[u8], domain: &[u8; 32], fields: &[&[u8]]) -> [u8; 32] {
    let schema_hash = keccak::hash(schema).to_bytes();
    let mut parts: Vec<&[u8]> = Vec::with_capacity(fields.len() + 1);
    parts.push(&schema_hash);
    parts.extend_from_slice(fields);
    let struct_hash = keccak::hashv(&parts).to_bytes();

    keccak::hashv(&[&TYPED_DATA_PREFIX, domain, &struct_hash]).to_bytes()
}

/// Cumulative per-sender statistics. Never decremented.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct PaymentStats {
    pub total_volume: u64,
    pub success_count: u64,
    /// Failed instructions roll back, so nothing on-chain can advance this.
    /// Kept for parity with off-chain indexers that track failures.
    pub failure_count: u64,
    pub last_payment_time: i64,
}

impl PaymentStats {
    pub const SIZE: usize = 8 + 8 + 8 + 8;

    pub fn record_success(&mut self, amount: u64, now: i64) -> Result<()> {
        self.total_volume = self
            .total_volume
            .checked_add(amount)
            .ok_or(SnowrailError::MathOverflow)?;
        self.success_count = self
            .success_count
            .checked_add(1)
            .ok_or(SnowrailError::MathOverflow)?;
        self.last_payment_time = now;
        Ok(())
    }
}

/// Per-sender nonce counter, statistics and escrowed lamports for relayed
/// payments. PDA seeds: ["sender", owner].
#[account]
pub struct SenderLedger {
    pub owner: Pubkey,
    /// Next nonce a signed authorization must carry
    pub nonce: u64,
    pub stats: PaymentStats,
    /// Lamports available to signed payments (excludes rent)
    pub escrow: u64,
    pub bump: u8,
}

impl SenderLedger {
    pub const SIZE: usize = 8 +  // discriminator
        32 +                     // owner
        8 +                      // nonce
        PaymentStats::SIZE +     // stats
        8 +                      // escrow
        1;                       // bump

    /// Bind a freshly created ledger to its owner. No-op once bound.
    pub fn bind(&mut self, owner: Pubkey, bump: u8) {
        if self.owner == Pubkey::default() {
            self.owner = owner;
            self.bump = bump;
        }
    }

    /// Consume `nonce` if it is exactly the next expected value.
    pub fn consume_nonce(&mut self, nonce: u64) -> Result<()> {
        require!(nonce == self.nonce, SnowrailError::InvalidNonce);
        self.nonce = self.nonce.checked_add(1).ok_or(SnowrailError::MathOverflow)?;
        Ok(())
    }

    pub fn credit_escrow(&mut self, amount: u64) -> Result<()> {
        require!(amount > 0, SnowrailError::InvalidAmount);
        self.escrow = self
            .escrow
            .checked_add(amount)
            .ok_or(SnowrailError::MathOverflow)?;
        Ok(())
    }

    pub fn debit_escrow(&mut self, amount: u64) -> Result<()> {
        require!(amount > 0, SnowrailError::InvalidAmount);
        self.escrow = self
            .escrow
            .checked_sub(amount)
            .ok_or(SnowrailError::InsufficientEscrow)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ledger() -> SenderLedger {
        SenderLedger {
            owner: Pubkey::default(),
            nonce: 0,
            stats: PaymentStats::default(),
            escrow: 0,
            bump: 0,
        }
    }

    fn auth(sender: Pubkey, recipient: Pubkey) -> PaymentAuthorization {
        PaymentAuthorization {
            sender,
            recipient,
            amount: 100,
            token: NATIVE_TOKEN,
            nonce: 0,
            deadline: 1_700_003_600,
            resource_tag: [5u8; 32],
        }
    }

    #[test]
    fn test_nonces_are_strictly_sequential() {
        let mut l = ledger();
        for expected in 0..5u64 {
            l.consume_nonce(expected).unwrap();
        }
        assert_eq!(l.nonce, 5);

        // Reuse and gaps both fail without moving the counter.
        assert_eq!(l.consume_nonce(4).unwrap_err(), SnowrailError::InvalidNonce.into());
        assert_eq!(l.consume_nonce(6).unwrap_err(), SnowrailError::InvalidNonce.into());
        assert_eq!(l.nonce, 5);
    }

    #[test]
    fn test_bind_only_once() {
        let mut l = ledger();
        let first = Pubkey::new_unique();
        l.bind(first, 254);
        l.bind(Pubkey::new_unique(), 1);

        assert_eq!(l.owner, first);
        assert_eq!(l.bump, 254);
    }

    #[test]
    fn test_escrow_cannot_go_negative() {
        let mut l = ledger();
        l.credit_escrow(1_000).unwrap();
        l.debit_escrow(600).unwrap();

        assert_eq!(
            l.debit_escrow(401).unwrap_err(),
            SnowrailError::InsufficientEscrow.into()
        );
        assert_eq!(l.escrow, 400);
    }

    #[test]
    fn test_stats_accumulate() {
        let mut stats = PaymentStats::default();
        stats.record_success(100, 10).unwrap();
        stats.record_success(50, 20).unwrap();

        assert_eq!(stats.total_volume, 150);
        assert_eq!(stats.success_count, 2);
        assert_eq!(stats.failure_count, 0);
        assert_eq!(stats.last_payment_time, 20);
    }

    #[test]
    fn test_deadline_is_inclusive() {
        let a = auth(Pubkey::new_unique(), Pubkey::new_unique());
        assert!(a.ensure_not_expired(a.deadline).is_ok());
        assert_eq!(
            a.ensure_not_expired(a.deadline + 1).unwrap_err(),
            SnowrailError::ExpiredDeadline.into()
        );
    }

    #[test]
    fn test_field_validation() {
        let sender = Pubkey::new_unique();
        let mut a = auth(sender, Pubkey::new_unique());
        assert!(a.validate_fields().is_ok());

        a.amount = 0;
        assert_eq!(a.validate_fields().unwrap_err(), SnowrailError::InvalidAmount.into());

        a.amount = 100;
        a.recipient = Pubkey::default();
        assert_eq!(a.validate_fields().unwrap_err(), SnowrailError::ZeroAddress.into());

        a.recipient = Pubkey::new_unique();
        a.token = Pubkey::new_unique();
        assert_eq!(a.validate_fields().unwrap_err(), SnowrailError::UnsupportedToken.into());
    }

    #[test]
    fn test_digest_is_domain_separated() {
        let program_a = Pubkey::new_unique();
        let program_b = Pubkey::new_unique();
        let salt = [9u8; 32];
        let a = auth(Pubkey::new_unique(), Pubkey::new_unique());

        let d1 = a.digest(&domain_separator(&program_a, &salt));
        assert_eq!(d1, a.digest(&domain_separator(&program_a, &salt)));
        assert_ne!(d1, a.digest(&domain_separator(&program_b, &salt)));
        assert_ne!(d1, a.digest(&domain_separator(&program_a, &[8u8; 32])));
    }

    #[test]
    fn test_digest_covers_every_field() {
        let domain = domain_separator(&Pubkey::new_unique(), &[0u8; 32]);
        let base = auth(Pubkey::new_unique(), Pubkey::new_unique());
        let d = base.digest(&domain);

        let mut changed = base.clone();
        changed.nonce = 1;
        assert_ne!(d, changed.digest(&domain));

        let mut changed = base.clone();
        changed.deadline += 1;
        assert_ne!(d, changed.digest(&domain));

        let mut changed = base.clone();
        changed.resource_tag = [6u8; 32];
        assert_ne!(d, changed.digest(&domain));

        let mut changed = base;
        changed.amount = 101;
        assert_ne!(d, changed.digest(&domain));
    }
}
