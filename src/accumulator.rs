/// Running scalar moments of a sample stream.
///
/// Every call to [Accumulator::update] costs O(1) regardless of how many
/// samples have been seen.
#[derive(Debug, Clone, PartialEq)]
pub struct Accumulator {
    count: u64,
    sum: f64,
    sum_squares: f64,
    min: f64,
    max: f64,
}

impl Default for Accumulator {
    #[inline]
    fn default() -> Self {
        Self {
            count: 0,
            sum: 0.0,
            sum_squares: 0.0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }
}

impl Accumulator {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one occurrence of `value`.
    #[inline]
    pub fn update(&mut self, value: f64) {
        if self.count == 0 || value < self.min {
            self.min = value;
        }
        if self.count == 0 || value > self.max {
            self.max = value;
        }
        self.count += 1;
        self.sum += value;
        self.sum_squares += value * value;
    }

    /// Total number of samples.
    #[inline]
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Sum of all samples.
    #[inline]
    pub fn sum(&self) -> f64 {
        self.sum
    }

    /// Sum of the squares of all samples.
    #[inline]
    pub fn sum_squares(&self) -> f64 {
        self.sum_squares
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Minimum of all samples.
    #[inline]
    pub fn min(&self) -> Option<f64> {
        (self.count > 0).then_some(self.min)
    }

    /// Maximum of all samples.
    #[inline]
    pub fn max(&self) -> Option<f64> {
        (self.count > 0).then_some(self.max)
    }

    /// Mean of all samples.
    #[inline]
    pub fn mean(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }

    /// Population standard deviation, computed from the raw moments as
    /// `sqrt(n * sum_squares - sum^2) / n`.
    ///
    /// This loses precision when the magnitude of the sum is large relative
    /// to the spread.
    #[inline]
    pub fn stdev(&self) -> Option<f64> {
        (self.count > 0).then(|| {
            let n = self.count as f64;
            (n * self.sum_squares - self.sum * self.sum).sqrt() / n
        })
    }
}
