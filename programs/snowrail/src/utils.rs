use anchor_lang::prelude::*;
use anchor_lang::system_program;

use crate::errors::SnowrailError;
use crate::state::RoleGrant;

/// Read a program account that may not exist yet. Records such as trust
/// attestations and agent budgets are always passed at their PDA address;
/// an uninitialised address reads as `None` so a caller cannot skip a gate by
/// leaving the account out.
pub fn read_optional<T: AccountDeserialize + Owner>(info: &AccountInfo) -> Result<Option<T>> {
    if info.owner != &T::owner() || info.data_is_empty() {
        return Ok(None);
    }
    let data = info.try_borrow_data()?;
    Ok(Some(T::try_deserialize(&mut &data[..])?))
}

/// Write back a record loaded with `read_optional`.
pub fn write_account<T: AccountSerialize>(info: &AccountInfo, value: &T) -> Result<()> {
    let mut data = info.try_borrow_mut_data()?;
    let mut cursor: &mut [u8] = &mut data[..];
    value.try_serialize(&mut cursor)?;
    Ok(())
}

/// Require that `identity` holds every bit of `required` according to the
/// role record at `role_info`. A missing record means no capabilities.
pub fn require_capability(role_info: &AccountInfo, identity: &Pubkey, required: u8) -> Result<()> {
    match read_optional::<RoleGrant>(role_info)? {
        Some(role) => role.require(identity, required),
        None => err!(SnowrailError::Unauthorized),
    }
}

/// Move lamports out of a signer's wallet through the system program.
pub fn transfer_from_signer<'info>(
    system: &Program<'info, System>,
    from: AccountInfo<'info>,
    to: AccountInfo<'info>,
    amount: u64,
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }
    system_program::transfer(
        CpiContext::new(system.to_account_info(), system_program::Transfer { from, to }),
        amount,
    )
}

/// Move lamports out of an account this program owns.
pub fn transfer_from_program(from: &AccountInfo, to: &AccountInfo, amount: u64) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }
    let debited = from
        .lamports()
        .checked_sub(amount)
        .ok_or(SnowrailError::MathOverflow)?;
    let credited = to
        .lamports()
        .checked_add(amount)
        .ok_or(SnowrailError::MathOverflow)?;

    **from.try_borrow_mut_lamports()? = debited;
    **to.try_borrow_mut_lamports()? = credited;
    Ok(())
}
