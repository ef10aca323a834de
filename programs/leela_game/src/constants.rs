/// Number of squares on the board.
pub const BOARD_SQUARES: u8 = 72;

/// Reaching this square wins the game.
pub const GOAL_SQUARE: u8 = 68;

/// Square taken by a player once they are let into play.
pub const ENTRY_SQUARE: u8 = 1;

/// The only roll that lets a waiting player into play.
pub const ENTRY_ROLL: u8 = 6;

pub const MIN_ROLL: u8 = 1;

pub const MAX_ROLL: u8 = 6;

/// Squares a single player account can hold in its move history.
///
/// Once the history is full the player can no longer roll, so the game cannot be won. Upserting
/// with `PlayerAction::Created` clears the history and starts a new game.
pub const MAX_PLAN_HISTORY: usize = 1000;

pub const MAX_FULL_NAME_LEN: usize = 64;

pub const MAX_AVATAR_LEN: usize = 200;

pub const MAX_INTENTION_LEN: usize = 280;

pub const MAX_REPORT_LEN: usize = 280;

pub const MAX_COMMENT_LEN: usize = 280;

/// First id handed out by both the report and the comment sequence.
pub const FIRST_ID: u64 = 1;

/// Content a report carries once it has been retracted.
pub const DELETED_REPORT_CONTENT: &str = "This report has been deleted.";

/// Snakes and ladders as `(from, to)` pairs. Ladders climb, snakes fall.
pub const JUMPS: [(u8, u8); 20] = [
    // ladders
    (10, 23),
    (17, 69),
    (20, 32),
    (22, 60),
    (27, 41),
    (28, 50),
    (37, 66),
    (45, 67),
    (46, 62),
    (54, 68),
    // snakes
    (12, 8),
    (16, 4),
    (24, 7),
    (29, 6),
    (44, 9),
    (52, 35),
    (55, 3),
    (61, 13),
    (63, 2),
    (72, 51),
];
