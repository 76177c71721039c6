use crate::domain::{PerSide, Side};

/// Points a side needs before it can take a set
pub const POINTS_TO_WIN_SET: u32 = 11;
/// Lead required to close out a set; there is no points cap
pub const MIN_WINNING_MARGIN: u32 = 2;
/// Sets needed to take a best-of-5 match
pub const SETS_TO_WIN_MATCH: u8 = 3;
/// Upper bound on sets in a match
pub const MAX_SETS: usize = (SETS_TO_WIN_MATCH as usize) * 2 - 1;

/// Returns the side that has won a set with the given points, if any.
///
/// A side wins once it has at least 11 points and leads by at least 2. This
/// covers straight wins (11-4) and extended deuce (12-10, 15-13) alike.
pub fn set_winner(points: &PerSide<u32>) -> Option<Side> {
    [Side::A, Side::B].into_iter().find(|&side| {
        let own = points[side];
        let other = points[side.other()];
        own >= POINTS_TO_WIN_SET && own.saturating_sub(other) >= MIN_WINNING_MARGIN
    })
}

/// Returns the side that has taken the match with the given set tallies, if any
pub fn match_winner(sets_won: &PerSide<u8>) -> Option<Side> {
    [Side::A, Side::B]
        .into_iter()
        .find(|&side| sets_won[side] >= SETS_TO_WIN_MATCH)
}
