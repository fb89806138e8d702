//! Progress-percentage arithmetic shared by enrollments and exam grading.

/// Percentage of `part` out of `whole`, rounded half-up and clamped to [0, 100].
///
/// A `whole` of zero yields zero rather than dividing.
pub fn rounded_percent(part: u64, whole: u64) -> u8 {
    if whole == 0 {
        return 0;
    }
    let part = part.min(whole);
    let percent = (part * 100 + whole / 2) / whole;
    // part <= whole keeps the quotient within 0..=100.
    u8::try_from(percent.min(100)).unwrap_or(100)
}
