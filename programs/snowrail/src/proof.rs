//! Withdrawal proof verification.
//!
//! The pool's invariants (root-history membership, nullifier uniqueness) do
//! not depend on the proof system, so verification sits behind a trait and a
//! real circuit verifier can replace the shipped one.

use anchor_lang::prelude::*;

/// Public inputs every withdrawal proof is bound to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PublicInputs {
    pub root: [u8; 32],
    pub nullifier: [u8; 32],
    pub recipient: Pubkey,
    pub relayer: Pubkey,
    pub fee: u64,
    pub denomination: u64,
}

pub trait ProofVerifier {
    fn verify(&self, proof: &[u8], inputs: &PublicInputs) -> bool;
}

/// Accepts any non-empty proof. Placeholder until a circuit verifier is
/// wired in; it performs no zero-knowledge check.
pub struct NonEmptyProofVerifier;

impl ProofVerifier for NonEmptyProofVerifier {
    fn verify(&self, proof: &[u8], _inputs: &PublicInputs) -> bool {
        !proof.is_empty()
    }
}

/// Verifier used by the `withdraw` instruction.
pub const ACTIVE_VERIFIER: NonEmptyProofVerifier = NonEmptyProofVerifier;

/// Upper bound on proof bytes accepted by `withdraw`.
pub const MAX_PROOF_LEN: usize = 512;
