use std::num::NonZero;

use crate::Price;

/// Rolling population standard deviation around a precomputed basis.
///
/// Position `i` is `None` while the window is still filling or when
/// `basis[i]` is `None`. Otherwise it is `sqrt(Σ(x - basis[i])² / n)` over
/// the `n` values ending at `i`. The divisor is `n`, not `n - 1`.
///
/// The squared deviations are summed directly from the window rather than
/// derived from a running sum of squares, which keeps a constant window at
/// exactly zero and avoids cancellation on large prices.
pub(crate) fn population_std_dev(
    values: &[Price],
    basis: &[Option<Price>],
    length: NonZero<usize>,
) -> Vec<Option<Price>> {
    debug_assert_eq!(values.len(), basis.len(), "basis must align with values");

    let length = length.get();
    #[allow(clippy::cast_precision_loss)]
    let divisor = length as f64;

    basis
        .iter()
        .enumerate()
        .map(|(i, mean)| {
            let mean = (*mean)?;
            let start = (i + 1).checked_sub(length)?;

            let sum_of_squares: f64 = values[start..=i]
                .iter()
                .map(|value| (value - mean).powi(2))
                .sum();

            Some((sum_of_squares / divisor).sqrt())
        })
        .collect()
}
