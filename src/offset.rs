/// Shifts `values` by `offset` positions without wraparound.
///
/// A positive offset moves each value toward later positions (the value at
/// `i` lands at `i + offset`), a negative offset toward earlier ones. Values
/// pushed past either end are dropped and positions that receive nothing
/// become `None`. The output always has the input's length.
///
/// Shifting only moves values. Timestamps stay where they are, which is what
/// pushes an overlay forward or backward relative to fixed candles.
///
/// # Example
///
/// ```
/// use bandline::shift;
///
/// let basis = [None, None, Some(12.0), Some(14.0), Some(16.0)];
///
/// assert_eq!(shift(&basis, 2), vec![None, None, None, None, Some(12.0)]);
/// assert_eq!(shift(&basis, -3), vec![Some(14.0), Some(16.0), None, None, None]);
/// ```
#[must_use]
pub fn shift<T: Copy>(values: &[Option<T>], offset: isize) -> Vec<Option<T>> {
    let len = values.len();
    let mut shifted = vec![None; len];

    let distance = offset.unsigned_abs();
    if distance >= len {
        return shifted;
    }

    if offset >= 0 {
        shifted[distance..].copy_from_slice(&values[..len - distance]);
    } else {
        shifted[..len - distance].copy_from_slice(&values[distance..]);
    }

    shifted
}
