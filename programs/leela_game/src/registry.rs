//! Player profile upserts.
//!
//! `upsert` is the single entry point; the [`PlayerAction`] picks one of three handlers that all
//! write the same [`Player`] record.

use anchor_lang::prelude::*;

use crate::constants::{MAX_AVATAR_LEN, MAX_FULL_NAME_LEN, MAX_INTENTION_LEN};
use crate::error::LeelaError;
use crate::state::{Player, PlayerAction};
use crate::validation::{ensure_author, ensure_text_len};

/// Profile text supplied with an upsert.
pub struct Profile {
    pub full_name: String,
    pub avatar: String,
    pub intention: String,
}

impl Profile {
    fn validate(&self) -> Result<()> {
        ensure_text_len(&self.full_name, MAX_FULL_NAME_LEN)?;
        ensure_text_len(&self.avatar, MAX_AVATAR_LEN)?;
        ensure_text_len(&self.intention, MAX_INTENTION_LEN)
    }
}

pub fn upsert(
    player: &mut Player,
    principal: Pubkey,
    profile: Profile,
    action: PlayerAction,
    bump: u8,
) -> Result<()> {
    if !player.is_fresh() {
        ensure_author(&player.principal, &principal)?;
    }
    match action {
        PlayerAction::Created => create(player, principal, profile, bump),
        PlayerAction::Updated => update(player, principal, profile, bump),
        PlayerAction::Deleted => retire(player),
    }
}

/// Write the profile and put progress back to its starting values.
fn create(player: &mut Player, principal: Pubkey, profile: Profile, bump: u8) -> Result<()> {
    profile.validate()?;
    write_profile(player, principal, profile, bump);
    player.reset_progress();
    Ok(())
}

/// Write the profile and keep progress. A fresh account's progress is already zeroed.
fn update(player: &mut Player, principal: Pubkey, profile: Profile, bump: u8) -> Result<()> {
    profile.validate()?;
    write_profile(player, principal, profile, bump);
    Ok(())
}

/// Clear the profile text, keep progress and keep the record resolvable.
fn retire(player: &mut Player) -> Result<()> {
    require!(!player.is_fresh(), LeelaError::PlayerNotFound);
    player.full_name.clear();
    player.avatar.clear();
    player.intention.clear();
    player.exists = false;
    Ok(())
}

fn write_profile(player: &mut Player, principal: Pubkey, profile: Profile, bump: u8) {
    player.principal = principal;
    player.full_name = profile.full_name;
    player.avatar = profile.avatar;
    player.intention = profile.intention;
    player.exists = true;
    player.bump = bump;
}
