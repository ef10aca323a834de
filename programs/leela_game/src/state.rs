//! Program state and domain types.
//!
//! Every record lives in its own PDA. `GameState` owns the two id sequences, `Player` holds a
//! principal's profile and board progress, and `Report`/`Comment`/`ReportLike` make up the
//! content feed layered on top of the game.

use anchor_lang::prelude::*;

use crate::constants::{DELETED_REPORT_CONTENT, FIRST_ID};
use crate::error::LeelaError;

#[account]
#[derive(InitSpace, Default)]
/// Singleton account (PDA `["game"]`) holding the monotonic id sequences.
pub struct GameState {
    /// Signer that initialized the game.
    pub authority: Pubkey,
    /// Id the next report will receive. Never reused.
    pub next_report_id: u64,
    /// Id the next comment will receive. Independent of the report sequence and never reused.
    pub next_comment_id: u64,
    pub bump: u8,
}

impl GameState {
    pub fn reset(&mut self, authority: Pubkey, bump: u8) {
        self.authority = authority;
        self.next_report_id = FIRST_ID;
        self.next_comment_id = FIRST_ID;
        self.bump = bump;
    }

    /// Hand out the next report id and advance the sequence.
    pub fn allocate_report_id(&mut self) -> Result<u64> {
        let id = self.next_report_id;
        self.next_report_id = id.checked_add(1).ok_or(LeelaError::IdOverflow)?;
        Ok(id)
    }

    /// Hand out the next comment id and advance the sequence.
    pub fn allocate_comment_id(&mut self) -> Result<u64> {
        let id = self.next_comment_id;
        self.next_comment_id = id.checked_add(1).ok_or(LeelaError::IdOverflow)?;
        Ok(id)
    }
}

#[account]
#[derive(InitSpace, Default)]
/// Per-principal profile and game progress (PDA `["player", principal]`).
pub struct Player {
    /// Wallet that owns this record. `Pubkey::default()` until the first upsert.
    pub principal: Pubkey,
    #[max_len(64)]
    pub full_name: String,
    #[max_len(200)]
    pub avatar: String,
    #[max_len(280)]
    pub intention: String,
    /// Current square, `0` while the player has not entered play.
    pub plan: u8,
    pub is_start: bool,
    pub is_finished: bool,
    /// Cleared when the profile is retired; the record stays readable.
    pub exists: bool,
    /// Squares occupied after each accepted move, oldest first.
    #[max_len(1000)]
    pub plan_history: Vec<u8>,
    pub bump: u8,
}

/// Where a player stands in the turn state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerStage {
    NotEntered,
    InPlay,
    Won,
}

impl Player {
    pub fn stage(&self) -> PlayerStage {
        if self.is_finished {
            PlayerStage::Won
        } else if self.is_start {
            PlayerStage::InPlay
        } else {
            PlayerStage::NotEntered
        }
    }

    /// True until the first successful upsert writes a principal into the account.
    pub fn is_fresh(&self) -> bool {
        self.principal == Pubkey::default()
    }

    pub fn status(&self) -> GameStatus {
        GameStatus {
            is_start: self.is_start,
            is_finished: self.is_finished,
        }
    }

    pub fn reset_progress(&mut self) {
        self.plan = 0;
        self.is_start = false;
        self.is_finished = false;
        self.plan_history.clear();
    }
}

/// Upsert selector. The numbering matches the order clients have always sent.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerAction {
    Created,
    Updated,
    Deleted,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameStatus {
    pub is_start: bool,
    pub is_finished: bool,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
/// Player record without the move history, small enough for return data.
pub struct PlayerView {
    pub principal: Pubkey,
    pub full_name: String,
    pub avatar: String,
    pub intention: String,
    pub plan: u8,
    pub is_start: bool,
    pub is_finished: bool,
    pub exists: bool,
}

impl From<&Player> for PlayerView {
    fn from(player: &Player) -> Self {
        Self {
            principal: player.principal,
            full_name: player.full_name.clone(),
            avatar: player.avatar.clone(),
            intention: player.intention.clone(),
            plan: player.plan,
            is_start: player.is_start,
            is_finished: player.is_finished,
            exists: player.exists,
        }
    }
}

#[account]
#[derive(InitSpace, Default)]
/// A turn report (PDA `["report", report_id]`). Deletion leaves a tombstone.
pub struct Report {
    pub report_id: u64,
    pub reporter: Pubkey,
    #[max_len(280)]
    pub content: String,
    /// Number of principals whose like flag is currently set.
    pub likes: u64,
    pub deleted: bool,
    /// Live comments in creation order. Grown by realloc, one id per comment.
    #[max_len(0)]
    pub comment_ids: Vec<u64>,
    pub bump: u8,
}

impl Report {
    /// Account size (discriminator included) with room for `comments` entries in the index.
    pub fn space(comments: usize) -> usize {
        8 + Report::INIT_SPACE + comments * 8
    }

    /// Size for an account currently `current` bytes long that must hold `comments` index entries.
    /// Never shrinks, so rent paid by earlier commenters stays with the report.
    pub fn grown_space(current: usize, comments: usize) -> usize {
        Report::space(comments).max(current)
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct ReportView {
    pub report_id: u64,
    pub reporter: Pubkey,
    pub content: String,
    pub likes: u64,
    pub deleted: bool,
    pub comment_count: u32,
}

impl From<&Report> for ReportView {
    fn from(report: &Report) -> Self {
        let content = if report.deleted {
            DELETED_REPORT_CONTENT.to_string()
        } else {
            report.content.clone()
        };
        Self {
            report_id: report.report_id,
            reporter: report.reporter,
            content,
            likes: report.likes,
            deleted: report.deleted,
            comment_count: report.comment_ids.len() as u32,
        }
    }
}

#[account]
#[derive(InitSpace, Default)]
/// A comment on a report (PDA `["comment", comment_id]`). Deletion closes the account.
pub struct Comment {
    pub comment_id: u64,
    /// Back-reference to the report; never changes.
    pub report_id: u64,
    pub commenter: Pubkey,
    #[max_len(280)]
    pub content: String,
    pub bump: u8,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct CommentView {
    pub comment_id: u64,
    pub report_id: u64,
    pub commenter: Pubkey,
    pub content: String,
}

impl From<&Comment> for CommentView {
    fn from(comment: &Comment) -> Self {
        Self {
            comment_id: comment.comment_id,
            report_id: comment.report_id,
            commenter: comment.commenter,
            content: comment.content.clone(),
        }
    }
}

#[account]
#[derive(InitSpace, Default)]
/// One principal's like flag on one report (PDA `["like", report_id, principal]`).
pub struct ReportLike {
    pub report_id: u64,
    pub player: Pubkey,
    pub liked: bool,
    pub bump: u8,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::*;

    #[test]
    fn account_sizes_follow_text_limits() {
        assert_eq!(
            Player::INIT_SPACE,
            32 + (4 + MAX_FULL_NAME_LEN)
                + (4 + MAX_AVATAR_LEN)
                + (4 + MAX_INTENTION_LEN)
                + 4
                + (4 + MAX_PLAN_HISTORY)
                + 1
        );
        assert_eq!(Report::INIT_SPACE, 8 + 32 + (4 + MAX_REPORT_LEN) + 8 + 1 + 4 + 1);
        assert_eq!(Comment::INIT_SPACE, 8 + 8 + 32 + (4 + MAX_COMMENT_LEN) + 1);
        assert_eq!(Report::space(3), Report::space(0) + 24);
    }

    #[test]
    fn report_space_only_grows() {
        // first comment on a fresh report
        assert_eq!(Report::grown_space(Report::space(0), 1), Report::space(1));
        // three comments were added and two removed: the slack is reused, not refunded
        assert_eq!(Report::grown_space(Report::space(3), 2), Report::space(3));
        assert_eq!(Report::grown_space(Report::space(3), 3), Report::space(3));
        assert_eq!(Report::grown_space(Report::space(3), 4), Report::space(4));
    }

    #[test]
    fn id_sequences_are_independent() {
        let mut game = GameState::default();
        game.reset(Pubkey::new_unique(), 255);

        assert_eq!(game.allocate_report_id().unwrap(), FIRST_ID);
        assert_eq!(game.allocate_report_id().unwrap(), FIRST_ID + 1);
        assert_eq!(game.allocate_comment_id().unwrap(), FIRST_ID);
        assert_eq!(game.next_report_id, FIRST_ID + 2);
        assert_eq!(game.next_comment_id, FIRST_ID + 1);
    }

    #[test]
    fn exhausted_sequence_is_rejected_without_advancing() {
        let mut game = GameState {
            next_report_id: u64::MAX,
            ..GameState::default()
        };
        assert!(game.allocate_report_id().is_err());
        assert_eq!(game.next_report_id, u64::MAX);
    }

    #[test]
    fn stage_follows_flags() {
        let mut player = Player::default();
        assert_eq!(player.stage(), PlayerStage::NotEntered);
        player.is_start = true;
        assert_eq!(player.stage(), PlayerStage::InPlay);
        player.is_finished = true;
        assert_eq!(player.stage(), PlayerStage::Won);
    }

    #[test]
    fn deleted_report_view_reads_sentinel() {
        let report = Report {
            report_id: 4,
            content: "stale".to_string(),
            deleted: true,
            comment_ids: vec![1, 2],
            ..Report::default()
        };
        let view = ReportView::from(&report);
        assert_eq!(view.content, DELETED_REPORT_CONTENT);
        assert_eq!(view.comment_count, 2);
    }
}
