//! Range falloff - ranged attacks get harder past the weapon's range

/// Default defense penalty per range increment beyond a weapon's range
pub const RANGE_PENALTY_PER_INCREMENT: u32 = 2;

/// Number of whole or partial range increments beyond `range`
///
/// `ceil(max(distance - range, 0) / range)`; a range of 0 means unlimited.
pub fn range_increments(distance: u32, range: u32) -> u32 {
    if range == 0 {
        return 0;
    }
    distance.saturating_sub(range).div_ceil(range)
}

/// Defense bonus a target gains from standing beyond the weapon's range
pub fn calculate_range_modifier(distance: u32, range: u32, penalty_per_increment: u32) -> u32 {
    range_increments(distance, range).saturating_mul(penalty_per_increment)
}
