//! Board traversal and turn resolution.
//!
//! The board is `1..=BOARD_SQUARES`; square `0` means the player has not entered play yet. A roll
//! is resolved in three steps: entry gating, tentative advance (overshoot past the last square is
//! not applied), then a single jump-table lookup.

use anchor_lang::prelude::*;

use crate::constants::{
    BOARD_SQUARES, ENTRY_ROLL, ENTRY_SQUARE, GOAL_SQUARE, JUMPS, MAX_PLAN_HISTORY,
};
use crate::error::LeelaError;
use crate::state::{Player, PlayerStage};
use crate::validation::ensure_roll_in_range;

/// What a single accepted roll did to a player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RollOutcome {
    pub rolled: u8,
    pub from: u8,
    pub to: u8,
    /// The roll let the player into play.
    pub entered: bool,
    /// The roll reached the goal square.
    pub won: bool,
}

/// Destination of a snake or ladder starting at `square`, or `square` itself.
pub fn jump_destination(square: u8) -> u8 {
    JUMPS
        .iter()
        .find(|(from, _)| *from == square)
        .map_or(square, |(_, to)| *to)
}

/// Square reached from `current` with `roll`, jumps applied.
///
/// A move that would pass the last square is not applied and returns `current`.
pub fn advance(current: u8, roll: u8) -> u8 {
    match current.checked_add(roll) {
        Some(tentative) if tentative <= BOARD_SQUARES => jump_destination(tentative),
        _ => current,
    }
}

/// Validate and apply one die roll to `player`.
///
/// All checks run before the first write, so an error leaves the player untouched.
pub fn resolve_roll(player: &mut Player, roll_result: u8) -> Result<RollOutcome> {
    ensure_roll_in_range(roll_result)?;
    let from = player.plan;

    match player.stage() {
        PlayerStage::Won => err!(LeelaError::GameFinished),
        PlayerStage::NotEntered => {
            if roll_result != ENTRY_ROLL {
                return Ok(RollOutcome {
                    rolled: roll_result,
                    from,
                    to: from,
                    entered: false,
                    won: false,
                });
            }
            ensure_history_room(player)?;
            player.is_start = true;
            player.plan = ENTRY_SQUARE;
            player.plan_history.push(ENTRY_SQUARE);
            Ok(RollOutcome {
                rolled: roll_result,
                from,
                to: ENTRY_SQUARE,
                entered: true,
                won: false,
            })
        }
        PlayerStage::InPlay => {
            ensure_history_room(player)?;
            let to = advance(from, roll_result);
            let won = to == GOAL_SQUARE;
            player.plan = to;
            player.plan_history.push(to);
            if won {
                player.is_finished = true;
            }
            Ok(RollOutcome {
                rolled: roll_result,
                from,
                to,
                entered: false,
                won,
            })
        }
    }
}

fn ensure_history_room(player: &Player) -> Result<()> {
    require!(
        player.plan_history.len() < MAX_PLAN_HISTORY,
        LeelaError::PlanHistoryFull
    );
    Ok(())
}
