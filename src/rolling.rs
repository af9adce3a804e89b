use crate::Price;

/// Mean over a fixed-size window sliding across a slice.
///
/// Yields one item per input position: `None` while fewer than `size`
/// values have been seen, then the mean of the last `size` values. Each step
/// adds the incoming value to a running sum and subtracts the evicted one,
/// so a full pass is O(n) regardless of window size.
///
/// A window made of one repeated value yields exactly that value. Windows
/// holding NaN or an infinity are summed directly and carry the non-finite
/// result; non-finite values are counted instead of accumulated so later
/// windows are unaffected. A running sum that overflows is rebuilt from the
/// window.
#[derive(Clone, Debug)]
pub(crate) struct RollingMean<'a> {
    values: &'a [Price],
    size: usize,
    divisor: f64,
    pos: usize,
    sum: CompensatedSum,
    non_finite: usize,
    /// Length of the run of bitwise-equal values ending at `pos - 1`.
    run: usize,
}

impl<'a> RollingMean<'a> {
    pub fn new(values: &'a [Price], size: usize) -> Self {
        debug_assert!(size > 0, "window size must be positive");

        #[allow(clippy::cast_precision_loss)]
        let divisor = size as f64;

        Self {
            values,
            size,
            divisor,
            pos: 0,
            sum: CompensatedSum::default(),
            non_finite: 0,
            run: 0,
        }
    }

    #[inline]
    fn admit(&mut self, value: Price) {
        let repeats = self
            .pos
            .checked_sub(1)
            .is_some_and(|prev| self.values[prev].to_bits() == value.to_bits());
        self.run = if repeats { self.run + 1 } else { 1 };

        if value.is_finite() {
            self.sum.add(value);
        } else {
            self.non_finite += 1;
        }
    }

    #[inline]
    fn evict(&mut self, value: Price) {
        if value.is_finite() {
            self.sum.add(-value);
        } else {
            self.non_finite -= 1;
        }
    }

    fn window_sum(&mut self, window: &[Price]) -> Price {
        if self.non_finite > 0 {
            return window.iter().sum();
        }

        let total = self.sum.total();
        if total.is_finite() {
            return total;
        }

        self.sum = CompensatedSum::of(window);
        let total = self.sum.total();
        if total.is_finite() {
            total
        } else {
            window.iter().sum()
        }
    }
}

impl Iterator for RollingMean<'_> {
    type Item = Option<Price>;

    fn next(&mut self) -> Option<Self::Item> {
        let &incoming = self.values.get(self.pos)?;
        self.admit(incoming);

        if self.pos >= self.size {
            self.evict(self.values[self.pos - self.size]);
        }
        self.pos += 1;

        if self.pos < self.size {
            return Some(None);
        }

        if self.run >= self.size && incoming.is_finite() {
            return Some(Some(incoming));
        }

        let window = &self.values[self.pos - self.size..self.pos];
        Some(Some(self.window_sum(window) / self.divisor))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.values.len() - self.pos;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for RollingMean<'_> {}

/// Neumaier-compensated sum. Keeps add/evict cycles from drifting away from
/// the sum of the values actually in the window.
#[derive(Clone, Copy, Debug, Default)]
struct CompensatedSum {
    sum: f64,
    compensation: f64,
}

impl CompensatedSum {
    fn of(values: &[Price]) -> Self {
        let mut sum = Self::default();
        for &value in values {
            sum.add(value);
        }
        sum
    }

    #[inline]
    fn add(&mut self, value: f64) {
        let total = self.sum + value;
        if self.sum.abs() >= value.abs() {
            self.compensation += (self.sum - total) + value;
        } else {
            self.compensation += (value - total) + self.sum;
        }
        self.sum = total;
    }

    #[inline]
    fn total(self) -> f64 {
        self.sum + self.compensation
    }
}
