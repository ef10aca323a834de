//! Checks shared by every mutating instruction.
//!
//! Each helper either passes or returns the matching [`LeelaError`] before the caller has
//! touched any account, so a rejected instruction commits nothing.

use anchor_lang::prelude::*;

use crate::constants::{MAX_ROLL, MIN_ROLL};
use crate::error::LeelaError;
use crate::state::Report;

pub fn ensure_roll_in_range(roll_result: u8) -> Result<()> {
    require!(
        (MIN_ROLL..=MAX_ROLL).contains(&roll_result),
        LeelaError::InvalidRoll
    );
    Ok(())
}

pub fn ensure_text_len(text: &str, max_len: usize) -> Result<()> {
    require!(text.len() <= max_len, LeelaError::TextTooLong);
    Ok(())
}

/// Only the original author may change or remove a record.
pub fn ensure_author(author: &Pubkey, caller: &Pubkey) -> Result<()> {
    require_keys_eq!(*author, *caller, LeelaError::Unauthorized);
    Ok(())
}

pub fn ensure_report_live(report: &Report) -> Result<()> {
    require!(!report.deleted, LeelaError::ReportDeleted);
    Ok(())
}

/// Read a program account that may not exist, reporting every failure as `missing`.
pub fn load_account<T: AccountDeserialize>(info: &AccountInfo, missing: LeelaError) -> Result<T> {
    let data = info.try_borrow_data()?;
    decode_account(info.owner, &data[..], missing)
}

/// Closed and never-created accounts are system-owned and empty; both read as `missing`, as does
/// data carrying another account type's discriminator.
pub fn decode_account<T: AccountDeserialize>(
    owner: &Pubkey,
    data: &[u8],
    missing: LeelaError,
) -> Result<T> {
    if *owner != crate::ID || data.is_empty() {
        return Err(missing.into());
    }
    let mut bytes = data;
    T::try_deserialize(&mut bytes).map_err(|_| missing.into())
}
