use anchor_lang::prelude::*;

use crate::errors::SnowrailError;

/// Capability flags (bitmask)
pub mod capability {
    pub const ADMIN: u8 = 1 << 0; // Fees, pause, roles, pool tiers
    pub const OPERATOR: u8 = 1 << 1; // Agent limits
    pub const ORACLE: u8 = 1 << 2; // Trust attestations
    pub const ALL: u8 = ADMIN | OPERATOR | ORACLE;
}

/// Capabilities held by one identity.
/// PDA seeds: ["role", identity]
#[account]
pub struct RoleGrant {
    pub identity: Pubkey,
    pub capabilities: u8,
    pub granted_by: Pubkey,
    pub updated_at: i64,
    pub bump: u8,
}

impl RoleGrant {
    pub const SIZE: usize = 8 +  // discriminator
        32 +                     // identity
        1 +                      // capabilities
        32 +                     // granted_by
        8 +                      // updated_at
        1;                       // bump

    pub fn has(&self, required: u8) -> bool {
        required != 0 && self.capabilities & required == required
    }

    pub fn require(&self, identity: &Pubkey, required: u8) -> Result<()> {
        require!(
            self.identity == *identity && self.has(required),
            SnowrailError::Unauthorized
        );
        Ok(())
    }

    pub fn grant(&mut self, identity: Pubkey, capabilities: u8, by: Pubkey, now: i64, bump: u8) {
        self.identity = identity;
        self.capabilities |= capabilities & capability::ALL;
        self.granted_by = by;
        self.updated_at = now;
        self.bump = bump;
    }

    pub fn revoke(&mut self, capabilities: u8, by: Pubkey, now: i64) {
        self.capabilities &= !capabilities;
        self.granted_by = by;
        self.updated_at = now;
    }
}
