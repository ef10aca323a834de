//! Reports, comments and likes.
//!
//! Reports are tombstoned on delete and stay addressable by id. Comments are hard-deleted: the
//! instruction closes the account and [`remove_comment`] drops the id from the report's index.

use anchor_lang::prelude::*;

use crate::constants::{DELETED_REPORT_CONTENT, MAX_COMMENT_LEN, MAX_REPORT_LEN};
use crate::error::LeelaError;
use crate::state::{Comment, CommentView, Report, ReportLike, ReportView};
use crate::validation::{ensure_author, ensure_report_live, ensure_text_len};

pub fn create_report(
    report: &mut Report,
    report_id: u64,
    reporter: Pubkey,
    content: String,
    bump: u8,
) -> Result<()> {
    ensure_text_len(&content, MAX_REPORT_LEN)?;
    report.report_id = report_id;
    report.reporter = reporter;
    report.content = content;
    report.likes = 0;
    report.deleted = false;
    report.comment_ids.clear();
    report.bump = bump;
    Ok(())
}

pub fn update_report_content(report: &mut Report, caller: &Pubkey, content: String) -> Result<()> {
    ensure_author(&report.reporter, caller)?;
    ensure_report_live(report)?;
    ensure_text_len(&content, MAX_REPORT_LEN)?;
    report.content = content;
    Ok(())
}

/// Tombstone a report. Deleting twice is a no-op; returns whether this call changed anything.
pub fn delete_report(report: &mut Report, caller: &Pubkey) -> Result<bool> {
    ensure_author(&report.reporter, caller)?;
    if report.deleted {
        return Ok(false);
    }
    report.deleted = true;
    report.content = DELETED_REPORT_CONTENT.to_string();
    Ok(true)
}

/// Set `player`'s like flag on `report` and keep the count in step with the flags.
///
/// Repeating the current flag changes nothing. Returns whether the count moved.
pub fn toggle_like(
    report: &mut Report,
    like: &mut ReportLike,
    player: Pubkey,
    liked: bool,
    bump: u8,
) -> Result<bool> {
    like.report_id = report.report_id;
    like.player = player;
    like.bump = bump;
    if like.liked == liked {
        return Ok(false);
    }
    report.likes = if liked {
        report.likes.checked_add(1).ok_or(LeelaError::LikeCountOverflow)?
    } else {
        report.likes.saturating_sub(1)
    };
    like.liked = liked;
    Ok(true)
}

pub fn add_comment(
    report: &mut Report,
    comment: &mut Comment,
    comment_id: u64,
    commenter: Pubkey,
    content: String,
    bump: u8,
) -> Result<()> {
    ensure_text_len(&content, MAX_COMMENT_LEN)?;
    comment.comment_id = comment_id;
    comment.report_id = report.report_id;
    comment.commenter = commenter;
    comment.content = content;
    comment.bump = bump;
    report.comment_ids.push(comment_id);
    Ok(())
}

pub fn update_comment_content(
    comment: &mut Comment,
    caller: &Pubkey,
    content: String,
) -> Result<()> {
    ensure_author(&comment.commenter, caller)?;
    ensure_text_len(&content, MAX_COMMENT_LEN)?;
    comment.content = content;
    Ok(())
}

/// Drop `comment` from its report's index. The caller closes the comment account.
pub fn remove_comment(report: &mut Report, comment: &Comment, caller: &Pubkey) -> Result<()> {
    ensure_author(&comment.commenter, caller)?;
    require!(
        comment.report_id == report.report_id,
        LeelaError::CommentNotFound
    );
    let position = report
        .comment_ids
        .iter()
        .position(|id| *id == comment.comment_id)
        .ok_or(LeelaError::CommentNotFound)?;
    report.comment_ids.remove(position);
    Ok(())
}

/// Order a page of reports by id. A report passed more than once is listed once.
pub fn collect_reports(mut reports: Vec<Report>) -> Result<Vec<ReportView>> {
    reports.sort_by_key(|report| report.report_id);
    reports.dedup_by_key(|report| report.report_id);
    Ok(reports.iter().map(ReportView::from).collect())
}

/// Lay out `comments` in the report's creation order.
///
/// Every comment must be live under `report`; ids the caller leaves out are skipped.
pub fn collect_comments(report: &Report, comments: Vec<Comment>) -> Result<Vec<CommentView>> {
    let mut slots: Vec<Option<CommentView>> = vec![None; report.comment_ids.len()];
    for comment in comments.iter() {
        require!(
            comment.report_id == report.report_id,
            LeelaError::CommentNotFound
        );
        let position = report
            .comment_ids
            .iter()
            .position(|id| *id == comment.comment_id)
            .ok_or(LeelaError::CommentNotFound)?;
        slots[position] = Some(CommentView::from(comment));
    }
    Ok(slots.into_iter().flatten().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::expect_err;

    fn report_by(reporter: Pubkey, id: u64) -> Report {
        let mut report = Report::default();
        create_report(&mut report, id, reporter, "Turn report".to_string(), 255).unwrap();
        report
    }

    fn comment_on(report: &mut Report, id: u64, commenter: Pubkey, text: &str) -> Comment {
        let mut comment = Comment::default();
        add_comment(report, &mut comment, id, commenter, text.to_string(), 255).unwrap();
        comment
    }

    #[test]
    fn new_report_starts_clean() {
        let reporter = Pubkey::new_unique();
        let report = report_by(reporter, 3);
        assert_eq!(report.report_id, 3);
        assert_eq!(report.reporter, reporter);
        assert_eq!(report.content, "Turn report");
        assert_eq!(report.likes, 0);
        assert!(!report.deleted);
        assert!(report.comment_ids.is_empty());
    }

    #[test]
    fn oversized_report_is_rejected() {
        let mut report = Report::default();
        expect_err(
            create_report(
                &mut report,
                1,
                Pubkey::new_unique(),
                "x".repeat(MAX_REPORT_LEN + 1),
                0,
            ),
            LeelaError::TextTooLong,
        );
    }

    #[test]
    fn author_updates_live_report() {
        let reporter = Pubkey::new_unique();
        let mut report = report_by(reporter, 1);
        update_report_content(&mut report, &reporter, "Updated report content".to_string())
            .unwrap();
        assert_eq!(report.content, "Updated report content");

        expect_err(
            update_report_content(&mut report, &Pubkey::new_unique(), "hijack".to_string()),
            LeelaError::Unauthorized,
        );
        assert_eq!(report.content, "Updated report content");
    }

    #[test]
    fn delete_report_is_idempotent_and_final() {
        let reporter = Pubkey::new_unique();
        let mut report = report_by(reporter, 1);

        assert!(delete_report(&mut report, &reporter).unwrap());
        assert!(!delete_report(&mut report, &reporter).unwrap());
        assert!(report.deleted);
        assert_eq!(report.content, DELETED_REPORT_CONTENT);

        expect_err(
            update_report_content(&mut report, &reporter, "revived".to_string()),
            LeelaError::ReportDeleted,
        );
        assert_eq!(ReportView::from(&report).content, DELETED_REPORT_CONTENT);
    }

    #[test]
    fn stranger_cannot_delete_report() {
        let mut report = report_by(Pubkey::new_unique(), 1);
        expect_err(
            delete_report(&mut report, &Pubkey::new_unique()),
            LeelaError::Unauthorized,
        );
        assert!(!report.deleted);
    }

    #[test]
    fn likes_count_distinct_principals() {
        let mut report = report_by(Pubkey::new_unique(), 9);
        let alice = Pubkey::new_unique();
        let bob = Pubkey::new_unique();
        let mut alice_like = ReportLike::default();
        let mut bob_like = ReportLike::default();

        assert!(toggle_like(&mut report, &mut alice_like, alice, true, 1).unwrap());
        assert!(!toggle_like(&mut report, &mut alice_like, alice, true, 1).unwrap());
        assert_eq!(report.likes, 1);
        assert_eq!(alice_like.report_id, 9);
        assert_eq!(alice_like.player, alice);

        toggle_like(&mut report, &mut bob_like, bob, true, 1).unwrap();
        assert_eq!(report.likes, 2);

        assert!(toggle_like(&mut report, &mut alice_like, alice, false, 1).unwrap());
        assert!(!toggle_like(&mut report, &mut alice_like, alice, false, 1).unwrap());
        assert_eq!(report.likes, 1);
        assert!(!alice_like.liked);
        assert!(bob_like.liked);
    }

    #[test]
    fn unlike_without_like_stays_at_zero() {
        let mut report = report_by(Pubkey::new_unique(), 1);
        let mut like = ReportLike::default();
        assert!(!toggle_like(&mut report, &mut like, Pubkey::new_unique(), false, 1).unwrap());
        assert_eq!(report.likes, 0);
    }

    #[test]
    fn like_count_overflow_is_not_an_id_error() {
        let mut report = report_by(Pubkey::new_unique(), 1);
        report.likes = u64::MAX;
        let mut like = ReportLike::default();
        expect_err(
            toggle_like(&mut report, &mut like, Pubkey::new_unique(), true, 1),
            LeelaError::LikeCountOverflow,
        );
        assert_eq!(report.likes, u64::MAX);
    }

    #[test]
    fn tombstoned_report_still_takes_comments_and_likes() {
        let reporter = Pubkey::new_unique();
        let mut report = report_by(reporter, 1);
        delete_report(&mut report, &reporter).unwrap();

        let comment = comment_on(&mut report, 5, reporter, "late");
        assert_eq!(comment.report_id, 1);
        let mut like = ReportLike::default();
        toggle_like(&mut report, &mut like, reporter, true, 1).unwrap();
        assert_eq!(report.likes, 1);
    }

    #[test]
    fn comment_lifecycle() {
        let commenter = Pubkey::new_unique();
        let mut report = report_by(Pubkey::new_unique(), 2);
        let mut first = comment_on(&mut report, 10, commenter, "Test Comment");
        let second = comment_on(&mut report, 11, commenter, "second");
        assert_eq!(report.comment_ids, vec![10, 11]);
        assert_eq!(first.report_id, 2);
        assert_eq!(first.commenter, commenter);

        update_comment_content(&mut first, &commenter, "Updated comment content".to_string())
            .unwrap();
        assert_eq!(first.content, "Updated comment content");

        remove_comment(&mut report, &first, &commenter).unwrap();
        assert_eq!(report.comment_ids, vec![11]);
        expect_err(
            remove_comment(&mut report, &first, &commenter),
            LeelaError::CommentNotFound,
        );

        let views = collect_comments(&report, vec![second]).unwrap();
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].comment_id, 11);
    }

    #[test]
    fn only_commenter_edits_or_removes() {
        let commenter = Pubkey::new_unique();
        let stranger = Pubkey::new_unique();
        let mut report = report_by(Pubkey::new_unique(), 2);
        let mut comment = comment_on(&mut report, 1, commenter, "mine");

        expect_err(
            update_comment_content(&mut comment, &stranger, "theirs".to_string()),
            LeelaError::Unauthorized,
        );
        expect_err(
            remove_comment(&mut report, &comment, &stranger),
            LeelaError::Unauthorized,
        );
        assert_eq!(comment.content, "mine");
        assert_eq!(report.comment_ids, vec![1]);
    }

    #[test]
    fn comment_from_another_report_is_not_removed() {
        let commenter = Pubkey::new_unique();
        let mut first = report_by(Pubkey::new_unique(), 1);
        let mut second = report_by(Pubkey::new_unique(), 2);
        let comment = comment_on(&mut first, 1, commenter, "here");

        expect_err(
            remove_comment(&mut second, &comment, &commenter),
            LeelaError::CommentNotFound,
        );
        assert_eq!(first.comment_ids, vec![1]);
    }

    #[test]
    fn comments_come_back_in_creation_order() {
        let commenter = Pubkey::new_unique();
        let mut report = report_by(Pubkey::new_unique(), 1);
        let a = comment_on(&mut report, 4, commenter, "a");
        let b = comment_on(&mut report, 7, commenter, "b");
        let c = comment_on(&mut report, 9, commenter, "c");

        let ids: Vec<u64> = collect_comments(&report, vec![c, a, b])
            .unwrap()
            .iter()
            .map(|view| view.comment_id)
            .collect();
        assert_eq!(ids, vec![4, 7, 9]);
    }

    #[test]
    fn removed_comment_is_rejected_by_listing() {
        let commenter = Pubkey::new_unique();
        let mut report = report_by(Pubkey::new_unique(), 1);
        let stale = comment_on(&mut report, 4, commenter, "a");
        remove_comment(&mut report, &stale, &commenter).unwrap();

        expect_err(
            collect_comments(&report, vec![stale]),
            LeelaError::CommentNotFound,
        );
    }

    #[test]
    fn reports_are_listed_by_id() {
        let reporter = Pubkey::new_unique();
        let views = collect_reports(vec![
            report_by(reporter, 3),
            report_by(reporter, 1),
            report_by(reporter, 2),
        ])
        .unwrap();
        let ids: Vec<u64> = views.iter().map(|view| view.report_id).collect();
        assert_eq!(ids, vec![1, 2, 3]);

    }

    #[test]
    fn repeated_report_is_listed_once() {
        let reporter = Pubkey::new_unique();
        let views = collect_reports(vec![
            report_by(reporter, 2),
            report_by(reporter, 1),
            report_by(reporter, 2),
        ])
        .unwrap();
        let ids: Vec<u64> = views.iter().map(|view| view.report_id).collect();
        assert_eq!(ids, vec![1, 2]);
    }
}
