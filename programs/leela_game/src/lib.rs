//! Leela: an on-chain snakes-and-ladders game with a social feed of turn reports.
//!
//! High level flow:
//! - A singleton `GameState` PDA holds the report and comment id sequences.
//! - Each wallet upserts its own `Player` PDA (create, update or retire the profile).
//! - Players roll a die (the result is supplied by the caller). A 6 lets a player into play, after
//!   which rolls move them across the board, through snakes and ladders, until square 68.
//! - Players post turn reports, comment on them and like them. Reports are tombstoned when deleted,
//!   comments are closed outright.
//! - A player account can be delegated to an ephemeral rollup for fast rolling and committed back.

use anchor_lang::prelude::*;
use ephemeral_rollups_sdk::anchor::{commit, delegate, ephemeral};
use ephemeral_rollups_sdk::cpi::DelegateConfig;
use ephemeral_rollups_sdk::ephem::commit_and_undelegate_accounts;
pub mod constants;
mod content;
pub mod error;
use error::*;
pub mod events;
use events::*;
mod movement;
mod registry;
pub mod state;
mod validation;
use movement::*;
use registry::Profile;
use state::*;
use validation::load_account;
declare_id!("BN4ouQi3bR3S81QAiozjEx2VBpLY5w6YiqBdoUcafUiq");

#[ephemeral]
#[program]
pub mod leela_game {
    use super::*;

    /// Create the singleton game account holding the id sequences.
    pub fn initialize_game(ctx: Context<InitializeGame>) -> Result<()> {
        msg!("Initializing game state");
        let authority = ctx.accounts.authority.key();
        ctx.accounts
            .game_state
            .reset(authority, ctx.bumps.game_state);
        emit!(GameInitializedEvent { authority });
        Ok(())
    }

    /// Create, update or retire the signer's player profile.
    pub fn upsert_player(
        ctx: Context<UpsertPlayer>,
        full_name: String,
        avatar: String,
        intention: String,
        action: PlayerAction,
    ) -> Result<()> {
        let payer = ctx.accounts.payer.key();
        msg!("Upserting player {:?}: {}", action, payer);
        registry::upsert(
            &mut ctx.accounts.player_account,
            payer,
            Profile {
                full_name,
                avatar,
                intention,
            },
            action,
            ctx.bumps.player_account,
        )?;
        emit!(PlayerUpsertedEvent {
            player: payer,
            action,
        });
        Ok(())
    }

    pub fn get_player(ctx: Context<ReadPlayer>) -> Result<PlayerView> {
        let player: Player = load_account(&ctx.accounts.player_account, LeelaError::PlayerNotFound)?;
        Ok(PlayerView::from(&player))
    }

    /// Apply a die roll chosen by the caller to the signer's player.
    ///
    /// `DiceRolledEvent` is emitted for every accepted roll, including rolls that leave a waiting
    /// player off the board, so clients can decide whether to post a turn report.
    pub fn roll_dice(ctx: Context<RollDice>, roll_result: u8) -> Result<()> {
        let payer = ctx.accounts.payer.key();
        msg!("Rolling {} for player: {}", roll_result, payer);
        let player = &mut ctx.accounts.player_account;
        let outcome = resolve_roll(player, roll_result)?;

        emit!(DiceRolledEvent::new(payer, &outcome, player));
        if let Some(won) = PlayerWonEvent::for_roll(payer, &outcome, player) {
            emit!(won);
        }
        Ok(())
    }

    pub fn check_game_status(ctx: Context<ReadPlayer>) -> Result<GameStatus> {
        let player: Player = load_account(&ctx.accounts.player_account, LeelaError::PlayerNotFound)?;
        Ok(player.status())
    }

    pub fn get_plan_history(ctx: Context<ReadPlayer>) -> Result<Vec<u8>> {
        let player: Player = load_account(&ctx.accounts.player_account, LeelaError::PlayerNotFound)?;
        Ok(player.plan_history)
    }

    /// Post a turn report. Returns the new report id.
    pub fn create_report(ctx: Context<CreateReport>, content: String) -> Result<u64> {
        let reporter = ctx.accounts.reporter.key();
        msg!("Creating report for: {}", reporter);
        let report_id = ctx.accounts.game_state.allocate_report_id()?;
        content::create_report(
            &mut ctx.accounts.report,
            report_id,
            reporter,
            content,
            ctx.bumps.report,
        )?;
        emit!(ReportCreatedEvent {
            report_id,
            reporter,
        });
        Ok(report_id)
    }

    /// `report_id` only selects the report PDA through the account seeds.
    #[allow(unused_variables)]
    pub fn get_report(ctx: Context<ReadReport>, report_id: u64) -> Result<ReportView> {
        let report: Report = load_account(&ctx.accounts.report, LeelaError::ReportNotFound)?;
        Ok(ReportView::from(&report))
    }

    /// Read a page of reports, ordered by id.
    ///
    /// Remaining accounts are the report PDAs to read. Keep pages small enough for the result to fit
    /// in return data.
    pub fn get_all_reports(ctx: Context<ReadReports>) -> Result<Vec<ReportView>> {
        let reports = ctx
            .remaining_accounts
            .iter()
            .map(|info| load_account::<Report>(info, LeelaError::ReportNotFound))
            .collect::<Result<Vec<_>>>()?;
        content::collect_reports(reports)
    }

    pub fn update_report_content(
        ctx: Context<UpdateReportContent>,
        report_id: u64,
        content: String,
    ) -> Result<()> {
        let reporter = ctx.accounts.reporter.key();
        msg!("Updating report {}", report_id);
        content::update_report_content(&mut ctx.accounts.report, &reporter, content)?;
        emit!(ReportUpdatedEvent {
            report_id,
            reporter,
        });
        Ok(())
    }

    /// Tombstone a report. Repeating the call succeeds without further changes.
    pub fn delete_report(ctx: Context<DeleteReport>, report_id: u64) -> Result<()> {
        let reporter = ctx.accounts.reporter.key();
        msg!("Deleting report {}", report_id);
        if !content::delete_report(&mut ctx.accounts.report, &reporter)? {
            msg!("Report {} was already deleted", report_id);
        }
        emit!(ReportDeletedEvent {
            report_id,
            reporter,
        });
        Ok(())
    }

    /// Set or clear the signer's like on a report.
    pub fn toggle_like_report(
        ctx: Context<ToggleLikeReport>,
        report_id: u64,
        like: bool,
    ) -> Result<()> {
        let player = ctx.accounts.player.key();
        msg!("Setting like on report {} to {}", report_id, like);
        content::toggle_like(
            &mut ctx.accounts.report,
            &mut ctx.accounts.like_record,
            player,
            like,
            ctx.bumps.like_record,
        )?;
        emit!(ReportLikeToggledEvent {
            report_id,
            player,
            liked: like,
            likes: ctx.accounts.report.likes,
        });
        Ok(())
    }

    /// Comment on a report. Returns the new comment id.
    pub fn add_comment(ctx: Context<AddComment>, report_id: u64, content: String) -> Result<u64> {
        let commenter = ctx.accounts.commenter.key();
        msg!("Adding comment to report {}", report_id);
        let comment_id = ctx.accounts.game_state.allocate_comment_id()?;
        content::add_comment(
            &mut ctx.accounts.report,
            &mut ctx.accounts.comment,
            comment_id,
            commenter,
            content,
            ctx.bumps.comment,
        )?;
        emit!(CommentAddedEvent {
            comment_id,
            report_id,
            commenter,
        });
        Ok(comment_id)
    }

    /// `comment_id` only selects the comment PDA through the account seeds.
    #[allow(unused_variables)]
    pub fn get_comment(ctx: Context<ReadComment>, comment_id: u64) -> Result<CommentView> {
        let comment: Comment = load_account(&ctx.accounts.comment, LeelaError::CommentNotFound)?;
        Ok(CommentView::from(&comment))
    }

    /// Read a report's live comments in creation order.
    ///
    /// Remaining accounts are the comment PDAs to read; each must be in the report's index.
    /// `report_id` selects the report PDA through the account seeds.
    #[allow(unused_variables)]
    pub fn get_all_comments_for_report(
        ctx: Context<ReadComments>,
        report_id: u64,
    ) -> Result<Vec<CommentView>> {
        let report: Report = load_account(&ctx.accounts.report, LeelaError::ReportNotFound)?;
        let comments = ctx
            .remaining_accounts
            .iter()
            .map(|info| load_account::<Comment>(info, LeelaError::CommentNotFound))
            .collect::<Result<Vec<_>>>()?;
        content::collect_comments(&report, comments)
    }

    pub fn update_comment_content(
        ctx: Context<UpdateCommentContent>,
        comment_id: u64,
        content: String,
    ) -> Result<()> {
        let commenter = ctx.accounts.commenter.key();
        msg!("Updating comment {}", comment_id);
        content::update_comment_content(&mut ctx.accounts.comment, &commenter, content)?;
        emit!(CommentUpdatedEvent {
            comment_id,
            commenter,
        });
        Ok(())
    }

    /// Remove a comment for good: its id leaves the report index and the account is closed.
    pub fn delete_comment(ctx: Context<DeleteComment>, comment_id: u64) -> Result<()> {
        let commenter = ctx.accounts.commenter.key();
        msg!("Deleting comment {}", comment_id);
        content::remove_comment(&mut ctx.accounts.report, &ctx.accounts.comment, &commenter)?;
        emit!(CommentDeletedEvent {
            comment_id,
            report_id: ctx.accounts.report.report_id,
            commenter,
        });
        Ok(())
    }

    /// Delegate the signer's player PDA for ephemeral execution (optionally pinning a validator).
    pub fn delegate_player(ctx: Context<DelegatePlayer>) -> Result<()> {
        let payer = ctx.accounts.payer.key();
        msg!("Delegating player: {}", payer);
        ctx.accounts.delegate_pda(
            &ctx.accounts.payer,
            &[b"player", payer.as_ref()],
            DelegateConfig {
                // Pin the validator when one is passed as the first remaining account
                validator: ctx.remaining_accounts.first().map(|acc| acc.key()),
                ..Default::default()
            },
        )?;
        emit!(DelegatePlayerEvent { player: payer });
        Ok(())
    }

    /// End a delegated session: exit the player account and commit state back to L1.
    pub fn end_player_session<'info>(
        ctx: Context<'_, '_, '_, 'info, EndPlayerSession<'info>>,
    ) -> Result<()> {
        let payer = ctx.accounts.payer.key();
        msg!("Ending player session for: {}", payer);
        let player = &ctx.accounts.player_account;
        player.exit(&crate::ID)?;
        commit_and_undelegate_accounts(
            &ctx.accounts.payer.to_account_info(),
            vec![&player.to_account_info()],
            &ctx.accounts.magic_context,
            &ctx.accounts.magic_program,
        )?;
        emit!(UndelegateAndCommitEvent { player: payer });
        Ok(())
    }
}

#[derive(Accounts)]
/// Accounts for creating the singleton game account.
pub struct InitializeGame<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(init, payer = authority, space = 8 + GameState::INIT_SPACE, seeds = [b"game"], bump)]
    pub game_state: Account<'info, GameState>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
/// Accounts for writing the signer's own player record.
pub struct UpsertPlayer<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,

    #[account(
        init_if_needed,
        payer = payer,
        space = 8 + Player::INIT_SPACE,
        seeds = [b"player", payer.key().as_ref()],
        bump
    )]
    pub player_account: Account<'info, Player>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
/// Accounts for reading any principal's player record.
pub struct ReadPlayer<'info> {
    /// CHECK: Principal whose record is read; used only for PDA derivation
    pub principal: AccountInfo<'info>,

    /// CHECK: May be uninitialized; decoded by the handler
    #[account(seeds = [b"player", principal.key().as_ref()], bump)]
    pub player_account: UncheckedAccount<'info>,
}

#[derive(Accounts)]
/// Accounts for rolling the die for the signer's player.
pub struct RollDice<'info> {
    pub payer: Signer<'info>,

    #[account(mut, seeds = [b"player", payer.key().as_ref()], bump = player_account.bump)]
    pub player_account: Account<'info, Player>,
}

#[derive(Accounts)]
/// Accounts for posting a report under the next report id.
pub struct CreateReport<'info> {
    #[account(mut)]
    pub reporter: Signer<'info>,

    #[account(mut, seeds = [b"game"], bump = game_state.bump)]
    pub game_state: Account<'info, GameState>,

    #[account(
        init,
        payer = reporter,
        space = Report::space(0),
        seeds = [b"report".as_ref(), &game_state.next_report_id.to_le_bytes()],
        bump
    )]
    pub report: Account<'info, Report>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
#[instruction(report_id: u64)]
/// Accounts for reading a report that may not exist.
pub struct ReadReport<'info> {
    /// CHECK: May be uninitialized; decoded by the handler
    #[account(seeds = [b"report", &report_id.to_le_bytes()], bump)]
    pub report: UncheckedAccount<'info>,
}

#[derive(Accounts)]
/// Reports are passed as remaining accounts.
pub struct ReadReports {}

#[derive(Accounts)]
#[instruction(report_id: u64)]
/// Accounts for editing a report's content.
pub struct UpdateReportContent<'info> {
    pub reporter: Signer<'info>,

    #[account(mut, seeds = [b"report", &report_id.to_le_bytes()], bump = report.bump)]
    pub report: Account<'info, Report>,
}

#[derive(Accounts)]
#[instruction(report_id: u64)]
/// Accounts for tombstoning a report.
pub struct DeleteReport<'info> {
    pub reporter: Signer<'info>,

    #[account(mut, seeds = [b"report", &report_id.to_le_bytes()], bump = report.bump)]
    pub report: Account<'info, Report>,
}

#[derive(Accounts)]
#[instruction(report_id: u64)]
/// Accounts for setting the signer's like flag on a report.
pub struct ToggleLikeReport<'info> {
    #[account(mut)]
    pub player: Signer<'info>,

    #[account(mut, seeds = [b"report", &report_id.to_le_bytes()], bump = report.bump)]
    pub report: Account<'info, Report>,

    #[account(
        init_if_needed,
        payer = player,
        space = 8 + ReportLike::INIT_SPACE,
        seeds = [b"like".as_ref(), &report_id.to_le_bytes(), player.key().as_ref()],
        bump
    )]
    pub like_record: Account<'info, ReportLike>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
#[instruction(report_id: u64)]
/// Accounts for commenting on a report; the report grows by one index slot unless it already has room.
pub struct AddComment<'info> {
    #[account(mut)]
    pub commenter: Signer<'info>,

    #[account(mut, seeds = [b"game"], bump = game_state.bump)]
    pub game_state: Account<'info, GameState>,

    #[account(
        mut,
        seeds = [b"report", &report_id.to_le_bytes()],
        bump = report.bump,
        realloc = Report::grown_space(
            report.to_account_info().data_len(),
            report.comment_ids.len() + 1
        ),
        realloc::payer = commenter,
        realloc::zero = false
    )]
    pub report: Account<'info, Report>,

    #[account(
        init,
        payer = commenter,
        space = 8 + Comment::INIT_SPACE,
        seeds = [b"comment".as_ref(), &game_state.next_comment_id.to_le_bytes()],
        bump
    )]
    pub comment: Account<'info, Comment>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
#[instruction(comment_id: u64)]
/// Accounts for reading a comment that may have been deleted.
pub struct ReadComment<'info> {
    /// CHECK: May be uninitialized or closed; decoded by the handler
    #[account(seeds = [b"comment", &comment_id.to_le_bytes()], bump)]
    pub comment: UncheckedAccount<'info>,
}

#[derive(Accounts)]
#[instruction(report_id: u64)]
/// Accounts for listing a report's comments; comments are passed as remaining accounts.
pub struct ReadComments<'info> {
    /// CHECK: May be uninitialized; decoded by the handler
    #[account(seeds = [b"report", &report_id.to_le_bytes()], bump)]
    pub report: UncheckedAccount<'info>,
}

#[derive(Accounts)]
#[instruction(comment_id: u64)]
/// Accounts for editing a comment's content.
pub struct UpdateCommentContent<'info> {
    pub commenter: Signer<'info>,

    #[account(mut, seeds = [b"comment", &comment_id.to_le_bytes()], bump = comment.bump)]
    pub comment: Account<'info, Comment>,
}

#[derive(Accounts)]
#[instruction(comment_id: u64)]
/// Accounts for hard-deleting a comment.
pub struct DeleteComment<'info> {
    #[account(mut)]
    pub commenter: Signer<'info>,

    #[account(
        mut,
        close = commenter, // rent goes back to the commenter
        seeds = [b"comment", &comment_id.to_le_bytes()],
        bump = comment.bump
    )]
    pub comment: Account<'info, Comment>,

    #[account(mut, seeds = [b"report", &comment.report_id.to_le_bytes()], bump = report.bump)]
    pub report: Account<'info, Report>,
}

#[delegate]
#[derive(Accounts)]
/// Accounts for delegating the signer's player PDA to an ephemeral validator.
pub struct DelegatePlayer<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,

    #[account(seeds = [b"player", payer.key().as_ref()], bump = player_account.bump)]
    pub player_account: Account<'info, Player>,

    pub system_program: Program<'info, System>,

    /// CHECK: Delegated PDA account; constrained to match `player_account`.
    #[account(mut, del, constraint = pda.key() == player_account.key())]
    pub pda: AccountInfo<'info>,
}

#[commit]
#[derive(Accounts)]
/// Accounts for committing and undelegating the signer's player PDA.
pub struct EndPlayerSession<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,

    #[account(mut, seeds = [b"player", payer.key().as_ref()], bump = player_account.bump)]
    pub player_account: Account<'info, Player>,

    pub system_program: Program<'info, System>,
}
