use anchor_lang::prelude::*;

use crate::movement::RollOutcome;
use crate::state::{Player, PlayerAction};

#[event]
pub struct GameInitializedEvent {
    pub authority: Pubkey,
}

#[event]
pub struct PlayerUpsertedEvent {
    pub player: Pubkey,
    pub action: PlayerAction,
}

#[event]
pub struct DiceRolledEvent {
    pub player: Pubkey,
    pub rolled: u8,
    pub plan: u8,
    pub is_start: bool,
    pub is_finished: bool,
}

#[event]
pub struct PlayerWonEvent {
    pub player: Pubkey,
    pub moves: u32,
}

impl DiceRolledEvent {
    /// Payload for an accepted roll; `state` is the player after the roll was applied.
    pub fn new(player: Pubkey, outcome: &RollOutcome, state: &Player) -> Self {
        Self {
            player,
            rolled: outcome.rolled,
            plan: outcome.to,
            is_start: state.is_start,
            is_finished: state.is_finished,
        }
    }
}

impl PlayerWonEvent {
    /// Only the roll that reached the goal produces one. `moves` counts the recorded squares.
    pub fn for_roll(player: Pubkey, outcome: &RollOutcome, state: &Player) -> Option<Self> {
        outcome.won.then(|| Self {
            player,
            moves: state.plan_history.len() as u32,
        })
    }
}

#[event]
pub struct ReportCreatedEvent {
    pub report_id: u64,
    pub reporter: Pubkey,
}

#[event]
pub struct ReportUpdatedEvent {
    pub report_id: u64,
    pub reporter: Pubkey,
}

#[event]
pub struct ReportDeletedEvent {
    pub report_id: u64,
    pub reporter: Pubkey,
}

#[event]
pub struct ReportLikeToggledEvent {
    pub report_id: u64,
    pub player: Pubkey,
    pub liked: bool,
    pub likes: u64,
}

#[event]
pub struct CommentAddedEvent {
    pub comment_id: u64,
    pub report_id: u64,
    pub commenter: Pubkey,
}

#[event]
pub struct CommentUpdatedEvent {
    pub comment_id: u64,
    pub commenter: Pubkey,
}

#[event]
pub struct CommentDeletedEvent {
    pub comment_id: u64,
    pub report_id: u64,
    pub commenter: Pubkey,
}

#[event]
pub struct DelegatePlayerEvent {
    pub player: Pubkey,
}

#[event]
pub struct UndelegateAndCommitEvent {
    pub player: Pubkey,
}
