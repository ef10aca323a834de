use anchor_lang::prelude::*;

#[error_code]
pub enum LeelaError {
    #[msg("Invalid roll result: rollResult >= 1 && rollResult <= MAX_ROLL")]
    InvalidRoll,

    #[msg("Player is not registered")]
    PlayerNotFound,

    #[msg("Report does not exist")]
    ReportNotFound,

    #[msg("Comment does not exist")]
    CommentNotFound,

    #[msg("Report has been deleted")]
    ReportDeleted,

    #[msg("Game is already finished for this player")]
    GameFinished,

    #[msg("Only the author may change this record")]
    Unauthorized,

    #[msg("Text exceeds the maximum length")]
    TextTooLong,

    #[msg("Move history is full")]
    PlanHistoryFull,

    #[msg("Id sequence exhausted")]
    IdOverflow,

    #[msg("Like count overflow")]
    LikeCountOverflow,
}
