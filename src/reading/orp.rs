/// ORP (Optimal Recognition Point) calculation
///
/// Words are shifted so that the pivot letter stays at a fixed column.
/// The pivot moves further into the word as the word gets longer:
/// - 0-2 chars → index 0
/// - 3-5 chars → index 1
/// - 6-9 chars → index 2
/// - 10-13 chars → index 3
/// - 14+ chars → index 4
///
/// Length is counted in characters, not bytes.
pub fn calculate_orp_index(word: &str) -> usize {
    match word.chars().count() {
        0..=2 => 0,
        3..=5 => 1,
        6..=9 => 2,
        10..=13 => 3,
        _ => 4,
    }
}
